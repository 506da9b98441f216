//! Route handlers for the gateway.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use okpets_core::types::AccountId;
use serde::Deserialize;

use super::server::AppState;

/// Landing page.
pub async fn index() -> Html<&'static str> {
    Html(super::pages::index_html())
}

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "okpets-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
        "autopilots_running": state.registry.running_count(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
}

/// OAuth redirect target: exchange the code and remember the access token.
pub async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OAuthCallbackQuery>,
) -> (StatusCode, String) {
    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            "Не получен код авторизации.".to_string(),
        );
    };

    match state.ok.exchange_code(&code).await {
        Ok(tokens) => {
            match tokens.user_id {
                Some(uid) => {
                    state
                        .store
                        .set_access_token(AccountId::from(uid.clone()), tokens.access_token);
                    tracing::info!("🔑 OAuth completed for account {uid}");
                }
                // No uid in the grant response; the token cannot be tied
                // to an account, so there is nothing to store.
                None => tracing::warn!("OAuth response without user_id, token discarded"),
            }
            (
                StatusCode::OK,
                "Авторизация успешна! Можешь закрыть это окно.".to_string(),
            )
        }
        Err(e) => {
            tracing::warn!("⚠️ OAuth exchange failed: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "Не удалось завершить авторизацию, попробуй ещё раз.".to_string(),
            )
        }
    }
}

// --- Webhook payload types (OK.ru notification envelope) ---

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub notification: Notification,
}

#[derive(Debug, Default, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub message: Option<WebhookMessage>,
    pub uid: Option<String>,
    pub payload: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookMessage {
    pub sender: Option<WebhookSender>,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WebhookSender {
    pub uid: Option<String>,
}

impl Notification {
    /// Extract (account, input) from the two supported event kinds.
    fn account_and_input(&self) -> Option<(String, String)> {
        match self.kind.as_deref() {
            Some("message") => {
                let msg = self.message.as_ref()?;
                let uid = msg.sender.as_ref()?.uid.clone()?;
                Some((uid, msg.text.clone().unwrap_or_default()))
            }
            Some("click") => {
                let uid = self.uid.clone()?;
                Some((uid, self.payload.clone().unwrap_or_default()))
            }
            _ => None,
        }
    }
}

/// Inbound chat notification: dispatch the command and relay the reply.
pub async fn webhook(
    State(state): State<Arc<AppState>>,
    Json(event): Json<WebhookEvent>,
) -> (StatusCode, Json<serde_json::Value>) {
    let Some((uid, input)) = event.notification.account_and_input() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "unsupported event"})),
        );
    };

    let account = AccountId::from(uid.clone());
    let reply = state.dispatcher.handle(&account, &input).await;

    // Notification delivery is best-effort; a failed send never fails the
    // webhook, OK.ru would only retry it at us.
    let token = state.store.access_token(&account).unwrap_or_default();
    if let Err(e) = state
        .ok
        .send_message(&uid, &token, &reply.text, reply.template)
        .await
    {
        tracing::warn!("⚠️ reply to {uid} failed: {e}");
    }

    (StatusCode::OK, Json(serde_json::json!({"ok": true})))
}
