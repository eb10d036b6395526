pub mod modal;
pub mod models_panel;
pub mod new_chat;
pub mod query_form;
pub mod sidebar;
pub mod transcript;
