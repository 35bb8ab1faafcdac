/// Gameplay tuning for the player avatar.
#[derive(Debug, Clone, Copy)]
pub struct PlayerTuning {
    /// Side length of the square avatar in pixels.
    pub size: f32,

    /// Velocity applied on an axis while a direction key is held, in pixels per frame.
    pub speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: 25.0,
            speed: 7.0,
        }
    }
}
