use std::cell::Cell;
use std::rc::Rc;

use crate::models::{ChatId, ModelsInfo, NewChatForm, OptimizationMetric, QueryForm};
use crate::services::api::{ApiClient, ApiError};
use crate::state::{ModelSelection, SessionAction};

pub const GENERIC_FAILURE: &str = "An error occurred, please try again.";
pub const SAME_MODELS: &str = "Strong and weak models must be different.";
pub const NO_CHAT_SELECTED: &str = "Select or create a chat first.";

/// What the workflows need from the page: a way to change session state and
/// a blocking alert.
pub trait UiHost {
    fn dispatch(&self, action: SessionAction);
    fn alert(&self, message: &str);
}

/// One-at-a-time flag for a form. Holding the permit keeps the form locked.
#[derive(Clone, Default)]
pub struct SubmitGuard(Rc<Cell<bool>>);

pub struct SubmitPermit(Rc<Cell<bool>>);

impl SubmitGuard {
    pub fn try_acquire(&self) -> Option<SubmitPermit> {
        if self.0.replace(true) {
            return None;
        }
        Some(SubmitPermit(self.0.clone()))
    }

    pub fn is_locked(&self) -> bool {
        self.0.get()
    }
}

impl Drop for SubmitPermit {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Failed,
    /// Nothing was sent: the form was busy or its input was rejected.
    Skipped,
}

fn failure_text(err: &ApiError) -> String {
    format!("{}\n{}", GENERIC_FAILURE, err)
}

/// Network round trips of the chat page, each followed by the state changes
/// it implies.
#[derive(Clone)]
pub struct ChatController {
    api: ApiClient,
    query_guard: SubmitGuard,
}

impl ChatController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            query_guard: SubmitGuard::default(),
        }
    }

    pub fn query_guard(&self) -> &SubmitGuard {
        &self.query_guard
    }

    /// Refreshes the sidebar. Failures only reach the log; the previous list stays.
    pub async fn load_chats<H: UiHost>(&self, host: &H) {
        match self.api.list_chats().await {
            Ok(chats) => {
                log::debug!("Fetched {} chats", chats.len());
                host.dispatch(SessionAction::ChatsLoaded(chats));
            }
            Err(e) => log::error!("Error loading chats: {}", e),
        }
    }

    pub async fn load_chat<H: UiHost>(&self, host: &H, chat_id: ChatId) {
        log::info!("Loading chat with id: {}", chat_id);
        host.dispatch(SessionAction::TranscriptCleared);

        match self.api.get_chat(chat_id).await {
            Ok(chat) => host.dispatch(SessionAction::ChatLoaded { chat_id, chat }),
            Err(e) => {
                log::error!("Error loading chat {}: {}", chat_id, e);
                host.alert(&failure_text(&e));
            }
        }
    }

    /// Creates a chat, then shows it and refreshes the list. The button is
    /// relabelled while waiting but stays clickable.
    pub async fn create_chat<H: UiHost>(&self, host: &H, form: NewChatForm) -> SubmitOutcome {
        log::info!("Creating new chat '{}'", form.name);
        host.dispatch(SessionAction::CreateStarted);

        match self.api.create_chat(&form).await {
            Ok(chat_id) => {
                log::info!("New chat created: {}", chat_id);
                host.dispatch(SessionAction::CreateSucceeded);
                host.dispatch(SessionAction::CloseModal);
                futures_util::join!(self.load_chat(host, chat_id), self.load_chats(host));
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::error!("Error creating chat: {}", e);
                host.dispatch(SessionAction::CreateFailed);
                host.alert(&failure_text(&e));
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit_query<H: UiHost>(
        &self,
        host: &H,
        chat_id: Option<ChatId>,
        query: String,
        metric: Option<OptimizationMetric>,
    ) -> SubmitOutcome {
        let Some(_permit) = self.query_guard.try_acquire() else {
            log::debug!("Query already in flight, ignoring submit");
            return SubmitOutcome::Skipped;
        };
        let Some(chat_id) = chat_id else {
            host.alert(NO_CHAT_SELECTED);
            return SubmitOutcome::Skipped;
        };
        if query.trim().is_empty() {
            return SubmitOutcome::Skipped;
        }

        let form = QueryForm {
            chat_id,
            query,
            optimization_metric: metric,
        };
        log::info!("Getting AI response for chat {}", chat_id);
        host.dispatch(SessionAction::QueryStarted);

        match self.api.get_ai_response(&form).await {
            Ok(resp) => {
                host.dispatch(SessionAction::QueryAnswered {
                    chat_id,
                    user_message: resp.user_message,
                    ai_message: resp.ai_message,
                });
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::error!("Error getting AI response: {}", e);
                host.dispatch(SessionAction::QueryFailed);
                host.alert(&failure_text(&e));
                SubmitOutcome::Failed
            }
        }
    }

    /// Shows the configured model pair, fetching it unless `known` already has it.
    pub async fn load_models_info<H: UiHost>(&self, host: &H, known: Option<ModelsInfo>) {
        if let Some(info) = known {
            host.dispatch(SessionAction::ModelsInfoLoaded(info));
            return;
        }
        match self.api.models_info().await {
            Ok(info) => {
                log::debug!("Fetched models info: {:?}", info);
                host.dispatch(SessionAction::ModelsInfoLoaded(info));
            }
            Err(e) => log::error!("Error loading models info: {}", e),
        }
    }

    /// Available model identifiers; empty when the request fails.
    pub async fn fetch_all_models(&self) -> Vec<String> {
        self.api.all_models().await.unwrap_or_else(|e| {
            log::error!("Error in fetching all models: {}", e);
            Vec::new()
        })
    }

    pub async fn load_all_models<H: UiHost>(&self, host: &H) {
        let models = self.fetch_all_models().await;
        host.dispatch(SessionAction::ModelsLoaded(models));
    }

    pub async fn update_models<H: UiHost>(&self, host: &H, selection: ModelSelection) -> SubmitOutcome {
        if selection.strong == selection.weak {
            host.alert(SAME_MODELS);
            return SubmitOutcome::Skipped;
        }

        let info = ModelsInfo {
            strong_model_name: selection.strong,
            weak_model_name: selection.weak,
        };
        host.dispatch(SessionAction::UpdateStarted);

        match self.api.update_models_info(&info).await {
            Ok(updated) => {
                log::info!("Models updated: {:?}", updated);
                host.dispatch(SessionAction::UpdateSucceeded);
                self.load_models_info(host, Some(updated)).await;
                host.dispatch(SessionAction::CloseModal);
                SubmitOutcome::Sent
            }
            Err(e) => {
                log::error!("Error updating models: {}", e);
                host.dispatch(SessionAction::UpdateFailed);
                host.alert(&failure_text(&e));
                SubmitOutcome::Failed
            }
        }
    }
}
