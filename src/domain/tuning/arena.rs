/// Playfield dimensions in pixels.
///
/// Origin is the top-left corner with +Y pointing down, matching the canvas the client draws on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}
