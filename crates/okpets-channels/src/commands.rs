//! Chat command dispatch — inbound text/button payloads to bot replies.

use std::sync::Arc;

use okpets_autopilot::{ActionClient, AutopilotError, TaskRegistry};
use okpets_core::credentials::CredentialStore;
use okpets_core::types::AccountId;
use serde_json::Value;

use crate::okru::main_menu;

/// A recognized chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Feed,
    Exhibition,
    Walk,
    Meadow,
    AutoOn,
    AutoOff,
    Status,
}

impl Command {
    /// Parse normalized chat text or a button payload.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "играть" => Some(Self::Play),
            "кормить" => Some(Self::Feed),
            "выставка" => Some(Self::Exhibition),
            "прогулка" => Some(Self::Walk),
            "поляна" => Some(Self::Meadow),
            "авто" | "автозаход" => Some(Self::AutoOn),
            "стоп" => Some(Self::AutoOff),
            "статус" => Some(Self::Status),
            _ => None,
        }
    }

    /// Game endpoint and success reply for a one-shot command.
    fn one_shot(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Play => Some(("?action=play", "🚀 Поехали! Питомец в игре.")),
            Self::Feed => Some(("?action=food", "🍖 Твой питомец сыт!")),
            Self::Exhibition => Some(("show", "🖼️ Выставка посещена!")),
            Self::Walk => Some(("travel", "🚶 Гуляем!")),
            Self::Meadow => Some(("glade_dig", "🌿 Поляна раскопана!")),
            _ => None,
        }
    }
}

/// What the bot sends back: text, optionally with a button template.
#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub template: Option<Value>,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            template: None,
        }
    }

    fn with_menu(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            template: Some(main_menu()),
        }
    }
}

/// Turns inbound chat input into game actions and autopilot calls, and
/// formats the user-facing reply.
pub struct Dispatcher {
    registry: Arc<TaskRegistry>,
    client: Arc<dyn ActionClient>,
    store: Arc<CredentialStore>,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<TaskRegistry>,
        client: Arc<dyn ActionClient>,
        store: Arc<CredentialStore>,
    ) -> Self {
        Self {
            registry,
            client,
            store,
        }
    }

    pub async fn handle(&self, account: &AccountId, input: &str) -> Reply {
        let Some(command) = Command::parse(input) else {
            return Reply::with_menu("Чё будем мутить?");
        };

        match command {
            Command::AutoOn => {
                let creds = self.store.game_session(account);
                match self.registry.start(account.clone(), creds) {
                    Ok(_) => Reply::text("🤖 Автозаход включён! Питомец под присмотром."),
                    Err(AutopilotError::AlreadyRunning(_)) => {
                        Reply::text("Автозаход уже работает.")
                    }
                    Err(e) => Reply::text(format!("⚠️ Не вышло: {e}")),
                }
            }
            Command::AutoOff => match self.registry.stop(account) {
                Ok(()) => Reply::text("🛑 Автозаход выключен."),
                Err(AutopilotError::NotRunning(_)) => {
                    Reply::text("Автозаход и так не запущен.")
                }
                Err(e) => Reply::text(format!("⚠️ Не вышло: {e}")),
            },
            Command::Status => {
                if self.registry.is_running(account) {
                    Reply::text("🤖 Автозаход работает.")
                } else {
                    Reply::text("Автозаход не запущен.")
                }
            }
            one_shot => self.run_one_shot(account, one_shot).await,
        }
    }

    /// Visit a single game endpoint with the account's stored session.
    async fn run_one_shot(&self, account: &AccountId, command: Command) -> Reply {
        let Some((endpoint, success_text)) = command.one_shot() else {
            return Reply::with_menu("Чё будем мутить?");
        };
        let creds = self.store.game_session(account);
        let outcome = self.client.visit(endpoint, &creds).await;
        if !outcome.success {
            tracing::warn!(
                "⚠️ one-shot '{}' failed for {}: {}",
                endpoint,
                account,
                outcome.detail
            );
            return Reply::text("⚠️ mpets не отвечает, попробуй позже.");
        }
        Reply::text(success_text)
    }
}
