use crate::domain::{CoinBalance, EquippedSkins, ShopItem};
use crate::use_cases::{ProgressService, SkinCatalog, UpstreamError};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// One leaderboard row as stored by the progress service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub id: u64,
    pub username: String,
    pub survival_time: f64,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
struct SubmitScoreRequest<'a> {
    username: &'a str,
    survival_time: f64,
}

#[derive(Debug, Serialize)]
struct AddCoinsRequest<'a> {
    username: &'a str,
    coins: u32,
}

#[derive(Debug, Deserialize)]
struct AddCoinsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    coins: u64,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EquippedSkinsResponse {
    #[serde(default)]
    player_skin: Option<String>,
    #[serde(default)]
    enemy_skin: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ShopItemDto {
    key: String,
    #[serde(default)]
    img: Option<String>,
}

// The shop answers with either a bare array or `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ShopItemsResponse {
    Bare(Vec<ShopItemDto>),
    Wrapped { items: Vec<ShopItemDto> },
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

// Thin reqwest client for the external score, coin and shop service.
#[derive(Clone)]
pub struct ProgressClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProgressClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Top scores, best first.
    pub async fn leaderboard(&self) -> Result<Vec<ScoreEntry>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/scores", self.base_url))
            .send()
            .await
            .map_err(transport)?;
        let response = ensure_success(response).await?;
        response.json::<Vec<ScoreEntry>>().await.map_err(decode)
    }
}

#[async_trait]
impl ProgressService for ProgressClient {
    async fn submit_score(&self, username: &str, survival_secs: f64) -> Result<(), UpstreamError> {
        let response = self
            .http
            .post(format!("{}/scores", self.base_url))
            .json(&SubmitScoreRequest {
                username,
                survival_time: survival_secs,
            })
            .send()
            .await
            .map_err(transport)?;
        ensure_success(response).await.map(|_| ())
    }

    async fn add_coins(&self, username: &str, coins: u32) -> Result<CoinBalance, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/api/coins/add", self.base_url))
            .json(&AddCoinsRequest { username, coins })
            .send()
            .await
            .map_err(transport)?;
        let body = ensure_success(response)
            .await?
            .json::<AddCoinsResponse>()
            .await
            .map_err(decode)?;

        if !body.success {
            return Err(UpstreamError::Rejected(
                body.error.unwrap_or_else(|| "coin credit refused".to_string()),
            ));
        }
        Ok(CoinBalance { coins: body.coins })
    }
}

#[async_trait]
impl SkinCatalog for ProgressClient {
    async fn equipped(&self, username: &str) -> Result<EquippedSkins, UpstreamError> {
        let url = Url::parse_with_params(
            &format!("{}/api/shop/user", self.base_url),
            [("username", username)],
        )
        .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let response = self.http.get(url).send().await.map_err(transport)?;
        let body = ensure_success(response)
            .await?
            .json::<EquippedSkinsResponse>()
            .await
            .map_err(decode)?;

        Ok(EquippedSkins {
            player_skin: body.player_skin,
            enemy_skin: body.enemy_skin,
        })
    }

    async fn items(&self) -> Result<Vec<ShopItem>, UpstreamError> {
        let response = self
            .http
            .get(format!("{}/api/shop/items", self.base_url))
            .send()
            .await
            .map_err(transport)?;
        let body = ensure_success(response)
            .await?
            .json::<ShopItemsResponse>()
            .await
            .map_err(decode)?;

        let items = match body {
            ShopItemsResponse::Bare(items) | ShopItemsResponse::Wrapped { items } => items,
        };
        Ok(items
            .into_iter()
            .map(|item| ShopItem {
                key: item.key,
                img: item.img,
            })
            .collect())
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status.is_client_error() && status != StatusCode::NOT_FOUND {
        // Validation failures carry `{ "error": ... }`.
        if let Ok(body) = response.json::<ErrorResponse>().await {
            return Err(UpstreamError::Rejected(body.error));
        }
    }
    Err(UpstreamError::Status(status.as_u16()))
}

fn transport(e: reqwest::Error) -> UpstreamError {
    UpstreamError::Transport(e.to_string())
}

fn decode(e: reqwest::Error) -> UpstreamError {
    UpstreamError::Decode(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_shop_items_are_wrapped_then_they_still_decode() {
        let bare: ShopItemsResponse = serde_json::from_str(
            r#"[{"key":"knight","img":"/k.png","display_name":"Knight","price":5}]"#,
        )
        .expect("bare array");
        let wrapped: ShopItemsResponse =
            serde_json::from_str(r#"{"items":[{"key":"ghost"}]}"#).expect("wrapped object");

        let ShopItemsResponse::Bare(bare) = bare else {
            panic!("expected a bare array");
        };
        let ShopItemsResponse::Wrapped { items: wrapped } = wrapped else {
            panic!("expected a wrapped object");
        };
        assert_eq!(bare[0].img.as_deref(), Some("/k.png"));
        assert!(wrapped[0].img.is_none());
    }

    #[test]
    fn when_coin_response_lacks_success_then_it_counts_as_refused() {
        let body: AddCoinsResponse =
            serde_json::from_str(r#"{"error":"unknown user"}"#).expect("json");

        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("unknown user"));
    }

    #[test]
    fn when_base_url_has_trailing_slash_then_it_is_trimmed() {
        let client = ProgressClient::new("http://127.0.0.1:5000/", Duration::from_millis(100))
            .expect("client builds");

        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }
}
