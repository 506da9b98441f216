//! OK.ru REST API client — signing, message sending, OAuth exchange.

use std::collections::BTreeMap;

use md5::{Digest, Md5};
use okpets_core::config::OkConfig;
use okpets_core::error::{OkpetsError, Result};
use serde::Deserialize;
use serde_json::{Value, json};

/// Tokens returned by the OAuth `authorization_code` grant.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// OK.ru REST API client for one bot application.
pub struct OkClient {
    config: OkConfig,
    http: reqwest::Client,
}

impl OkClient {
    pub fn new(config: OkConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// OK API request signature: MD5 hex of `k1=v1k2=v2…` over key-sorted
    /// params, with the application secret appended.
    pub fn sign(&self, params: &BTreeMap<String, String>) -> String {
        let mut joined: String = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        joined.push_str(&self.config.secret_key);
        format!("{:x}", Md5::digest(joined.as_bytes()))
    }

    /// Signed POST to `fb.do`.
    pub async fn api_request(
        &self,
        method: &str,
        extra: BTreeMap<String, String>,
    ) -> Result<Value> {
        let mut params = BTreeMap::from([
            ("method".to_string(), method.to_string()),
            (
                "application_key".to_string(),
                self.config.public_key.clone(),
            ),
            ("format".to_string(), "json".to_string()),
        ]);
        params.extend(extra);
        let sig = self.sign(&params);
        params.insert("sig".to_string(), sig);

        let resp = self
            .http
            .post(format!("{}/fb.do", self.config.api_url))
            .form(&params)
            .send()
            .await
            .map_err(|e| OkpetsError::Channel(format!("OK API request failed: {e}")))?;
        resp.json()
            .await
            .map_err(|e| OkpetsError::Channel(format!("Invalid OK API response: {e}")))
    }

    /// Send a chat message on behalf of the community, optionally with a
    /// button template.
    pub async fn send_message(
        &self,
        uid: &str,
        access_token: &str,
        text: &str,
        template: Option<Value>,
    ) -> Result<Value> {
        let mut params = BTreeMap::from([
            ("access_token".to_string(), access_token.to_string()),
            ("uid".to_string(), uid.to_string()),
            ("message".to_string(), text.to_string()),
        ]);
        if let Some(template) = template {
            params.insert("template".to_string(), template.to_string());
        }
        self.api_request("mediatopic.post", params).await
    }

    /// Exchange an OAuth redirect code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<OAuthTokens> {
        let resp = self
            .http
            .get(format!("{}/oauth/token.do", self.config.api_url))
            .query(&[
                ("client_id", self.config.app_id.as_str()),
                ("client_secret", self.config.secret_key.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
            ])
            .send()
            .await
            .map_err(|e| OkpetsError::Channel(format!("OAuth exchange failed: {e}")))?;
        resp.json()
            .await
            .map_err(|e| OkpetsError::Channel(format!("Invalid OAuth response: {e}")))
    }
}

/// Main menu buttons: the five one-shot game actions plus the autopilot
/// toggles.
pub fn main_menu() -> Value {
    json!({
        "type": "buttons",
        "buttons": [
            {"title": "Играть",   "payload": "играть"},
            {"title": "Кормить",  "payload": "кормить"},
            {"title": "Выставка", "payload": "выставка"},
            {"title": "Прогулка", "payload": "прогулка"},
            {"title": "Поляна",   "payload": "поляна"},
            {"title": "Автозаход вкл",  "payload": "авто"},
            {"title": "Автозаход выкл", "payload": "стоп"},
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(secret: &str) -> OkClient {
        OkClient::new(OkConfig {
            app_id: "1".into(),
            public_key: "PUB".into(),
            secret_key: secret.into(),
            ..OkConfig::default()
        })
    }

    #[test]
    fn test_sign_known_vector() {
        // md5("a=1b=2SECRET")
        let client = client("SECRET");
        let params = BTreeMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        assert_eq!(client.sign(&params), "a708686ed8214d4d54e4bafd8d66df50");
    }

    #[test]
    fn test_sign_is_order_insensitive() {
        // BTreeMap sorts keys, so insertion order cannot change the sig.
        let client = client("SECRET");
        let forward = BTreeMap::from([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        let mut backward = BTreeMap::new();
        backward.insert("b".to_string(), "2".to_string());
        backward.insert("a".to_string(), "1".to_string());
        assert_eq!(client.sign(&forward), client.sign(&backward));
    }

    #[test]
    fn test_main_menu_has_game_and_autopilot_buttons() {
        let menu = main_menu();
        assert_eq!(menu["type"], "buttons");
        let buttons = menu["buttons"].as_array().unwrap();
        assert_eq!(buttons.len(), 7);
        assert_eq!(buttons[0]["payload"], "играть");
        assert_eq!(buttons[5]["payload"], "авто");
        assert_eq!(buttons[6]["payload"], "стоп");
    }
}
