use async_trait::async_trait;

use crate::domain::{CoinBalance, EquippedSkins, ResolvedSkins, ShopItem};
use crate::use_cases::types::{FrameState, HudState, Overlay};

// Presentation port. Implementations must not block; the session task calls these every frame.
pub trait Renderer: Send {
    fn render(&mut self, frame: &FrameState);
    fn show_overlay(&mut self, overlay: &Overlay);
    fn update_hud(&mut self, hud: &HudState);
    fn apply_skins(&mut self, skins: &ResolvedSkins);
}

// Failures talking to the external progress service.
#[derive(Debug)]
pub enum UpstreamError {
    Transport(String),
    Status(u16),
    Decode(String),
    // The service answered but refused the request (`success: false` or a 4xx error body).
    Rejected(String),
}

// Port for score and coin reporting.
#[async_trait]
pub trait ProgressService: Send + Sync {
    async fn submit_score(&self, username: &str, survival_secs: f64) -> Result<(), UpstreamError>;
    async fn add_coins(&self, username: &str, coins: u32) -> Result<CoinBalance, UpstreamError>;
}

// Port for the cosmetic shop lookups made at session start/reset.
#[async_trait]
pub trait SkinCatalog: Send + Sync {
    async fn equipped(&self, username: &str) -> Result<EquippedSkins, UpstreamError>;
    async fn items(&self) -> Result<Vec<ShopItem>, UpstreamError>;
}

/// Fetches the player's equipped skins and resolves them to image URLs.
pub async fn load_skins(
    catalog: &dyn SkinCatalog,
    username: &str,
) -> Result<ResolvedSkins, UpstreamError> {
    let equipped = catalog.equipped(username).await?;
    let items = catalog.items().await?;
    Ok(ResolvedSkins::resolve(&equipped, &items))
}
