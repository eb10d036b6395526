use web_sys::HtmlElement;
use yew::prelude::*;

use crate::config::RenderMode;
use crate::models::Message;
use crate::utils::render_markdown;

#[derive(Properties, PartialEq)]
pub struct MessageViewProps {
    pub message: Message,
    pub render_mode: RenderMode,
    pub on_click: Callback<Message>,
}

/// One transcript entry: author label plus content. Clicking it opens the
/// metadata viewer for the whole record.
#[function_component(MessageView)]
pub fn message_view(props: &MessageViewProps) -> Html {
    let message = props.message.clone().normalized();

    let content = match props.render_mode {
        RenderMode::Raw => html! { { message.content.clone() } },
        RenderMode::Markdown => render_markdown(&message.content),
    };

    let onclick = {
        let on_click = props.on_click.clone();
        let message = message.clone();
        Callback::from(move |_: MouseEvent| on_click.emit(message.clone()))
    };

    html! {
        <div class={classes!("message", message.role.clone())} {onclick}>
            <div class="author">{ &message.role }</div>
            <pre style="white-space: pre-wrap;" class="content">{ content }</pre>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct TranscriptProps {
    pub chat_name: Option<String>,
    pub messages: Vec<Message>,
    pub render_mode: RenderMode,
    pub scroll_generation: u64,
    pub on_message_click: Callback<Message>,
}

#[function_component(Transcript)]
pub fn transcript(props: &TranscriptProps) -> Html {
    let scroll_ref = use_node_ref();

    // Jump to the newest message whenever a load or answer lands.
    {
        let div_ref = scroll_ref.clone();
        use_effect_with(props.scroll_generation, move |_| {
            if let Some(div) = div_ref.cast::<HtmlElement>() {
                div.set_scroll_top(div.scroll_height());
            }
        });
    }

    let css = r#"
        #chat-header h2 { font-size: 1rem; margin: 0; font-weight: 600; overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
        .messages-container { flex-grow: 1; overflow-y: auto; padding: 20px; display: flex; flex-direction: column; gap: 15px; }
        .message { padding: 10px 15px; border-radius: 12px; max-width: 85%; cursor: pointer; box-shadow: 0 1px 2px rgba(0,0,0,0.05); }
        .message.user { align-self: flex-end; background-color: #e3f2fd; color: #1565c0; }
        .message.ai { align-self: flex-start; background-color: #f5f5f5; color: #333; }
        .message .author { font-size: 0.75rem; font-weight: 600; text-transform: uppercase; color: var(--text-secondary); margin-bottom: 4px; }
        .message .content { margin: 0; font-family: inherit; overflow-wrap: anywhere; }
        .empty-transcript { margin: auto; color: var(--text-secondary); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="header" id="chat-header">
                if let Some(name) = &props.chat_name {
                    <h2>{ name }</h2>
                } else {
                    <h2>{ "Chat Router" }</h2>
                }
            </div>
            <div class="messages-container" id="chat-messages" ref={scroll_ref}>
                if props.messages.is_empty() {
                    <div class="empty-transcript">{ "No messages yet." }</div>
                }
                { for props.messages.iter().enumerate().map(|(i, msg)| html! {
                    <MessageView
                        key={i.to_string()}
                        message={msg.clone()}
                        render_mode={props.render_mode}
                        on_click={props.on_message_click.clone()}
                    />
                })}
            </div>
        </>
    }
}

#[cfg(test)]
mod tests {
    use yew::LocalServerRenderer;

    use super::*;
    use crate::models::ROLE_AI;

    async fn render(mode: RenderMode, content: &str) -> String {
        let props = MessageViewProps {
            message: Message::new("assistant", content),
            render_mode: mode,
            on_click: Callback::noop(),
        };
        LocalServerRenderer::<MessageView>::with_props(props).render().await
    }

    #[tokio::test]
    async fn raw_mode_shows_content_verbatim() {
        let html = render(RenderMode::Raw, "**bold** text").await;
        assert!(html.contains("**bold** text"));
        assert!(!html.contains("<strong>"));
        assert!(!html.contains("markdown-body"));
    }

    #[tokio::test]
    async fn markdown_mode_renders_markup() {
        let html = render(RenderMode::Markdown, "**bold** text").await;
        assert!(html.contains("markdown-body"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(!html.contains("**bold**"));
    }

    #[tokio::test]
    async fn assistant_role_is_labelled_ai() {
        let html = render(RenderMode::Raw, "hi").await;
        assert!(html.contains(&format!("message {}", ROLE_AI)));
        assert!(!html.contains("assistant"));
    }
}
