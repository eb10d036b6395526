use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ChatId = u64;

pub const ROLE_USER: &str = "user";
pub const ROLE_AI: &str = "ai";
const ROLE_ASSISTANT: &str = "assistant";

/// One transcript entry. Everything besides `role` and `content` (model used,
/// predicted route, timestamps...) is kept verbatim for the metadata viewer.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Message {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            metadata: Map::new(),
        }
    }

    /// The backend labels model output "assistant"; the transcript calls it "ai".
    pub fn normalized(mut self) -> Self {
        if self.role == ROLE_ASSISTANT {
            self.role = ROLE_AI.to_string();
        }
        self
    }

    /// Full record as shown by the metadata viewer, indented by four spaces.
    pub fn metadata_json(&self) -> String {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        match self.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&out).into_owned(),
            Err(e) => format!("{{\"error\": \"{}\"}}", e),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ChatSummary {
    pub id: ChatId,
    pub name: String,
    #[serde(default)]
    pub started_at: String,
    #[serde(default)]
    pub last_message: Option<String>,
}

// API DTOs
#[derive(Deserialize, Debug)]
pub struct ChatListResponse {
    #[serde(default)]
    pub chats: Vec<ChatSummary>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChatDetail {
    #[serde(alias = "chat")]
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct NewChatForm {
    pub name: String,
    pub knowledgebase: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateChatResponse {
    pub chat_id: ChatId,
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationMetric {
    Price,
    Latency,
    #[default]
    Performance,
}

impl OptimizationMetric {
    pub const ALL: [OptimizationMetric; 3] = [Self::Price, Self::Latency, Self::Performance];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Latency => "latency",
            Self::Performance => "performance",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QueryForm {
    pub chat_id: ChatId,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_metric: Option<OptimizationMetric>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub user_message: Message,
    pub ai_message: Message,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug, Default)]
pub struct ModelsInfo {
    pub strong_model_name: String,
    pub weak_model_name: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct AllModelsResponse {
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}
