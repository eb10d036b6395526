use std::rc::Rc;

use yew::Reducible;

use crate::models::{ChatDetail, ChatId, ChatSummary, Message, ModelsInfo, NewChatForm, OptimizationMetric};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

impl SubmitPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmitPhase::Submitting)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ModalView {
    NewChat,
    UpdateModels,
    /// Pre-serialized message record.
    Metadata(String),
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ModelSelection {
    pub strong: String,
    pub weak: String,
}

#[derive(Clone, PartialEq, Debug)]
pub enum SessionAction {
    ChatsLoaded(Vec<ChatSummary>),
    TranscriptCleared,
    ChatLoaded { chat_id: ChatId, chat: ChatDetail },

    EditNewChatName(String),
    EditKnowledgebase(String),
    CreateStarted,
    CreateSucceeded,
    CreateFailed,

    EditQuery(String),
    SelectMetric(OptimizationMetric),
    QueryStarted,
    QueryAnswered { chat_id: ChatId, user_message: Message, ai_message: Message },
    QueryFailed,

    ModelsInfoLoaded(ModelsInfo),
    ModelsLoaded(Vec<String>),
    SelectStrongModel(String),
    SelectWeakModel(String),
    UpdateStarted,
    UpdateSucceeded,
    UpdateFailed,

    OpenModal(ModalView),
    CloseModal,
}

/// Everything the page shows, owned in one place and changed only through
/// [`SessionAction`]s.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SessionState {
    pub chats: Vec<ChatSummary>,
    pub current_chat_id: Option<ChatId>,
    pub chat_name: Option<String>,
    pub transcript: Vec<Message>,
    /// Bumped whenever the transcript should be scrolled to the bottom.
    pub scroll_generation: u64,

    pub new_chat: NewChatForm,
    pub create_phase: SubmitPhase,

    pub query: String,
    pub metric: OptimizationMetric,
    pub query_phase: SubmitPhase,

    pub models: Vec<String>,
    pub models_info: Option<ModelsInfo>,
    pub selection: ModelSelection,
    pub update_phase: SubmitPhase,

    pub modal: Option<ModalView>,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        use SessionAction::*;

        match action {
            ChatsLoaded(chats) => self.chats = chats,
            // Nothing is displayed until the next chat arrives.
            TranscriptCleared => {
                self.transcript.clear();
                self.current_chat_id = None;
                self.chat_name = None;
            }
            ChatLoaded { chat_id, chat } => {
                self.chat_name = Some(chat.name);
                self.transcript = chat.messages.into_iter().map(Message::normalized).collect();
                self.current_chat_id = Some(chat_id);
                self.scroll_generation += 1;
            }

            EditNewChatName(name) => self.new_chat.name = name,
            EditKnowledgebase(text) => self.new_chat.knowledgebase = text,
            CreateStarted => self.create_phase = SubmitPhase::Submitting,
            CreateSucceeded => {
                self.create_phase = SubmitPhase::Idle;
                self.new_chat = NewChatForm::default();
            }
            CreateFailed => self.create_phase = SubmitPhase::Idle,

            EditQuery(query) => self.query = query,
            SelectMetric(metric) => self.metric = metric,
            QueryStarted => self.query_phase = SubmitPhase::Submitting,
            QueryAnswered { chat_id, user_message, ai_message } => {
                self.query_phase = SubmitPhase::Idle;
                self.query.clear();
                // The user may have switched chats while waiting.
                if self.current_chat_id == Some(chat_id) {
                    self.transcript.push(user_message.normalized());
                    self.transcript.push(ai_message.normalized());
                    self.scroll_generation += 1;
                }
            }
            QueryFailed => self.query_phase = SubmitPhase::Idle,

            ModelsInfoLoaded(info) => self.models_info = Some(info),
            ModelsLoaded(models) => {
                if let Some(first) = models.first() {
                    if self.selection.strong.is_empty() {
                        self.selection.strong = first.clone();
                    }
                    if self.selection.weak.is_empty() {
                        self.selection.weak = first.clone();
                    }
                }
                self.models = models;
            }
            SelectStrongModel(name) => self.selection.strong = name,
            SelectWeakModel(name) => self.selection.weak = name,
            UpdateStarted => self.update_phase = SubmitPhase::Submitting,
            UpdateSucceeded => self.update_phase = SubmitPhase::Idle,
            UpdateFailed => self.update_phase = SubmitPhase::Idle,

            OpenModal(view) => self.modal = Some(view),
            CloseModal => self.modal = None,
        }
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ROLE_AI, ROLE_USER};

    fn chat(name: &str, contents: &[(&str, &str)]) -> ChatDetail {
        ChatDetail {
            name: name.to_string(),
            messages: contents.iter().map(|(r, c)| Message::new(r, *c)).collect(),
        }
    }

    #[test]
    fn loading_a_chat_replaces_the_transcript_in_order() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ChatLoaded {
            chat_id: 1,
            chat: chat("one", &[("user", "a"), ("assistant", "b")]),
        });
        state.apply(SessionAction::TranscriptCleared);
        assert!(state.transcript.is_empty());

        state.apply(SessionAction::ChatLoaded {
            chat_id: 2,
            chat: chat("two", &[("user", "x"), ("assistant", "y"), ("user", "z")]),
        });

        let contents: Vec<_> = state.transcript.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["x", "y", "z"]);
        assert_eq!(state.transcript[1].role, ROLE_AI);
        assert_eq!(state.current_chat_id, Some(2));
        assert_eq!(state.chat_name.as_deref(), Some("two"));
        assert_eq!(state.scroll_generation, 2);
    }

    #[test]
    fn clearing_the_transcript_forgets_the_displayed_chat() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ChatLoaded { chat_id: 5, chat: chat("five", &[("user", "a")]) });
        state.apply(SessionAction::TranscriptCleared);

        assert!(state.transcript.is_empty());
        assert_eq!(state.current_chat_id, None);
        assert_eq!(state.chat_name, None);

        // An answer that lands afterwards has no view to go into.
        state.apply(SessionAction::QueryAnswered {
            chat_id: 5,
            user_message: Message::new(ROLE_USER, "q"),
            ai_message: Message::new(ROLE_AI, "r"),
        });
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn answer_appends_user_then_ai_and_clears_query() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ChatLoaded { chat_id: 7, chat: chat("c", &[]) });
        state.apply(SessionAction::EditQuery("why?".into()));
        state.apply(SessionAction::QueryStarted);
        assert!(state.query_phase.is_submitting());

        state.apply(SessionAction::QueryAnswered {
            chat_id: 7,
            user_message: Message::new(ROLE_USER, "why?"),
            ai_message: Message::new("assistant", "because"),
        });

        assert_eq!(state.query_phase, SubmitPhase::Idle);
        assert!(state.query.is_empty());
        let roles: Vec<_> = state.transcript.iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, [ROLE_USER, ROLE_AI]);
    }

    #[test]
    fn answer_for_another_chat_is_not_appended() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ChatLoaded { chat_id: 2, chat: chat("c", &[("user", "a")]) });
        state.apply(SessionAction::QueryStarted);
        state.apply(SessionAction::QueryAnswered {
            chat_id: 1,
            user_message: Message::new(ROLE_USER, "q"),
            ai_message: Message::new(ROLE_AI, "r"),
        });

        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.query_phase, SubmitPhase::Idle);
    }

    #[test]
    fn failed_query_keeps_the_draft() {
        let mut state = SessionState::default();
        state.apply(SessionAction::EditQuery("keep me".into()));
        state.apply(SessionAction::QueryStarted);
        state.apply(SessionAction::QueryFailed);

        assert_eq!(state.query, "keep me");
        assert!(!state.query_phase.is_submitting());
    }

    #[test]
    fn creation_clears_drafts_only_on_success() {
        let mut state = SessionState::default();
        state.apply(SessionAction::EditNewChatName("Trip".into()));
        state.apply(SessionAction::EditKnowledgebase("Paris".into()));
        state.apply(SessionAction::CreateStarted);
        state.apply(SessionAction::CreateFailed);
        assert_eq!(state.new_chat.name, "Trip");

        state.apply(SessionAction::CreateStarted);
        state.apply(SessionAction::CreateSucceeded);
        assert_eq!(state.new_chat, NewChatForm::default());
        assert_eq!(state.create_phase, SubmitPhase::Idle);
    }

    #[test]
    fn models_default_both_selections_to_first() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ModelsLoaded(vec!["a".into(), "b".into()]));
        assert_eq!(state.selection, ModelSelection { strong: "a".into(), weak: "a".into() });

        state.apply(SessionAction::SelectWeakModel("b".into()));
        state.apply(SessionAction::ModelsLoaded(vec!["c".into()]));
        assert_eq!(state.selection.weak, "b");
    }

    #[test]
    fn empty_model_list_leaves_selection_empty() {
        let mut state = SessionState::default();
        state.apply(SessionAction::ModelsLoaded(Vec::new()));
        assert!(state.models.is_empty());
        assert_eq!(state.selection, ModelSelection::default());
    }

    #[test]
    fn reducer_does_not_touch_previous_state() {
        let before = Rc::new(SessionState::default());
        let after = before.clone().reduce(SessionAction::OpenModal(ModalView::NewChat));
        assert_eq!(before.modal, None);
        assert_eq!(after.modal, Some(ModalView::NewChat));
    }
}
