// Player profile data owned by the external progress service, and skin resolution.

/// Cosmetic keys a player has equipped in the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquippedSkins {
    pub player_skin: Option<String>,
    pub enemy_skin: Option<String>,
}

/// A shop entry; only the image matters for drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopItem {
    pub key: String,
    pub img: Option<String>,
}

/// Wallet total after a successful credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinBalance {
    pub coins: u64,
}

/// Image URLs to draw instead of the default colored shapes. `None` means default visuals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedSkins {
    pub player_img: Option<String>,
    pub enemy_img: Option<String>,
}

const DEFAULT_SKIN: &str = "default";

impl ResolvedSkins {
    pub fn resolve(equipped: &EquippedSkins, items: &[ShopItem]) -> Self {
        Self {
            player_img: image_for(equipped.player_skin.as_deref(), items),
            enemy_img: image_for(equipped.enemy_skin.as_deref(), items),
        }
    }
}

fn image_for(key: Option<&str>, items: &[ShopItem]) -> Option<String> {
    let key = key.filter(|k| !k.is_empty() && *k != DEFAULT_SKIN)?;
    items
        .iter()
        .find(|item| item.key == key)
        .and_then(|item| item.img.clone())
        .filter(|img| !img.is_empty())
}
