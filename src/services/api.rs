use std::rc::Rc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    AiResponse, AllModelsResponse, ChatDetail, ChatId, ChatListResponse, ChatSummary,
    CreateChatResponse, ErrorBody, ModelsInfo, NewChatForm, QueryForm,
};
use crate::services::csrf::{self, CSRF_HEADER};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Thin client over the chat backend's REST endpoints.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    cookies: Rc<dyn Fn() -> String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            cookies: Rc::new(csrf::document_cookies),
        }
    }

    /// Replaces where the cookie string is read from.
    pub fn with_cookies(mut self, cookies: impl Fn() -> String + 'static) -> Self {
        self.cookies = Rc::new(cookies);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_csrf(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(CSRF_HEADER, csrf::token_from_cookies(&(self.cookies)()))
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> ApiResult<T> {
        let status = resp.status();
        log::debug!("Response status: {}", status.as_u16());

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| status.as_u16().to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<T>().await?)
    }

    pub async fn list_chats(&self) -> ApiResult<Vec<ChatSummary>> {
        let resp = self.client.get(self.url("/api/chats")).send().await?;
        let data: ChatListResponse = Self::read_json(resp).await?;
        Ok(data.chats)
    }

    pub async fn get_chat(&self, chat_id: ChatId) -> ApiResult<ChatDetail> {
        let req = self.client.get(self.url(&format!("/api/chat/{}", chat_id)));
        let resp = self.with_csrf(req).send().await?;
        Self::read_json(resp).await
    }

    pub async fn create_chat(&self, form: &NewChatForm) -> ApiResult<ChatId> {
        let req = self.client.post(self.url("/api/create_chat/")).form(form);
        let resp = self.with_csrf(req).send().await?;
        let data: CreateChatResponse = Self::read_json(resp).await?;
        Ok(data.chat_id)
    }

    pub async fn get_ai_response(&self, form: &QueryForm) -> ApiResult<AiResponse> {
        let url = self.url(&format!("/api/chat/{}/get_ai_response/", form.chat_id));
        let req = self.client.post(url).form(form);
        let resp = self.with_csrf(req).send().await?;
        Self::read_json(resp).await
    }

    pub async fn models_info(&self) -> ApiResult<ModelsInfo> {
        let resp = self.client.get(self.url("/api/models_info")).send().await?;
        Self::read_json(resp).await
    }

    pub async fn update_models_info(&self, info: &ModelsInfo) -> ApiResult<ModelsInfo> {
        let req = self.client.put(self.url("/api/models_info/")).json(info);
        let resp = self.with_csrf(req).send().await?;
        Self::read_json(resp).await
    }

    pub async fn all_models(&self) -> ApiResult<Vec<String>> {
        let resp = self.client.get(self.url("/api/all_models")).send().await?;
        let data: AllModelsResponse = Self::read_json(resp).await?;
        Ok(data.models)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;

    use super::*;

    fn client(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(&server.url()).with_cookies(|| "sessionid=s; csrftoken=tok".to_string())
    }

    #[tokio::test]
    async fn it_lists_chats() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/chats")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"chats":[{"id":1,"name":"Trip","started_at":"2024-05-01","last_message":"ok"},{"id":2,"name":"Work","started_at":"2024-05-02"}]}"#)
            .create_async()
            .await;

        let chats = client(&server).list_chats().await.unwrap();

        assert_eq!(chats.len(), 2);
        assert_eq!(chats[0].name, "Trip");
        assert_eq!(chats[0].last_message.as_deref(), Some("ok"));
        assert_eq!(chats[1].last_message, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_sends_csrf_header_when_fetching_a_chat() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/chat/5")
            .match_header("x-csrftoken", "tok")
            .with_status(200)
            .with_body(r#"{"name":"Five","messages":[{"role":"user","content":"q"}]}"#)
            .create_async()
            .await;

        let chat = client(&server).get_chat(5).await.unwrap();

        assert_eq!(chat.name, "Five");
        assert_eq!(chat.messages.len(), 1);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_posts_new_chat_as_form() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/create_chat/")
            .match_header("x-csrftoken", "tok")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("name".into(), "Trip Planning".into()),
                Matcher::UrlEncoded("knowledgebase".into(), "Paris itinerary".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"chat_id":42}"#)
            .create_async()
            .await;

        let form = NewChatForm {
            name: "Trip Planning".into(),
            knowledgebase: "Paris itinerary".into(),
        };
        let id = client(&server).create_chat(&form).await.unwrap();

        assert_eq!(id, 42);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_omits_metric_when_not_selected() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat/3/get_ai_response/")
            .match_body("chat_id=3&query=hello")
            .with_status(200)
            .with_body(r#"{"user_message":{"role":"user","content":"hello"},"ai_message":{"role":"assistant","content":"hi"}}"#)
            .create_async()
            .await;

        let form = QueryForm {
            chat_id: 3,
            query: "hello".into(),
            optimization_metric: None,
        };
        let resp = client(&server).get_ai_response(&form).await.unwrap();

        assert_eq!(resp.ai_message.content, "hi");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn it_surfaces_backend_message_on_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/chat/9")
            .with_status(500)
            .with_body(r#"{"message":"DB down"}"#)
            .create_async()
            .await;

        let err = client(&server).get_chat(9).await.unwrap_err();

        assert!(matches!(err, ApiError::Http { status: 500, .. }));
        assert_eq!(err.to_string(), "Error 500: DB down");
    }

    #[tokio::test]
    async fn it_falls_back_to_status_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/chat/9")
            .with_status(404)
            .with_body("<html>not found</html>")
            .create_async()
            .await;

        let err = client(&server).get_chat(9).await.unwrap_err();

        assert_eq!(err.to_string(), "Error 404: Not Found");
    }

    #[tokio::test]
    async fn it_reports_transport_errors() {
        let api = ApiClient::new("http://127.0.0.1:1");
        let err = api.all_models().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }

    #[tokio::test]
    async fn it_puts_models_info_as_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/models_info/")
            .match_header("x-csrftoken", "tok")
            .match_body(Matcher::Json(serde_json::json!({
                "strong_model_name": "gpt-4o",
                "weak_model_name": "llama3",
            })))
            .with_status(200)
            .with_body(r#"{"strong_model_name":"gpt-4o","weak_model_name":"llama3"}"#)
            .create_async()
            .await;

        let info = ModelsInfo {
            strong_model_name: "gpt-4o".into(),
            weak_model_name: "llama3".into(),
        };
        let updated = client(&server).update_models_info(&info).await.unwrap();

        assert_eq!(updated, info);
        mock.assert_async().await;
    }
}
