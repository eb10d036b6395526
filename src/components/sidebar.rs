use yew::prelude::*;

use crate::models::{ChatId, ChatSummary};

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub chats: Vec<ChatSummary>,
    pub active_chat_id: Option<ChatId>,
    pub on_select: Callback<ChatId>,
    pub on_new: Callback<()>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    // CSS for this specific component
    let css = r#"
        .sidebar { background: var(--bg-sidebar); border-right: 1px solid var(--border-color); display: flex; flex-direction: column; overflow: hidden; flex-shrink: 0; width: 260px; }
        .sidebar-content { width: 260px; height: 100%; display: flex; flex-direction: column; padding: 10px; }
        .chat-list { flex-grow: 1; overflow-y: auto; margin-top: 10px; }
        .chat-item { padding: 10px; border-radius: 6px; cursor: pointer; margin-bottom: 2px; font-size: 0.9rem; color: var(--text-primary); }
        .chat-item:hover { background: #eaeaeb; }
        .chat-item.active { background: #e0e0e0; font-weight: 500; }
        .chat-name { overflow: hidden; text-overflow: ellipsis; white-space: nowrap; font-weight: 600; }
        .chat-date, .chat-preview { font-size: 0.75rem; color: var(--text-secondary); overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
        .new-chat-btn { width: 100%; padding: 10px; border: 1px solid var(--border-color); background: white; border-radius: 6px; cursor: pointer; text-align: left; display: flex; gap: 10px; transition: background 0.2s; }
        .new-chat-btn:hover { background: #f0f0f0; }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="sidebar">
                <div class="sidebar-content">
                    <button class="new-chat-btn" onclick={props.on_new.reform(|_| ())}>
                        <span>{ "+" }</span>
                        <span>{ "New Chat" }</span>
                    </button>
                    <div class="chat-list" id="chats-list">
                        { for props.chats.iter().map(|chat| {
                            let id = chat.id;
                            let active_class = (props.active_chat_id == Some(id)).then_some("active");
                            let on_sel = props.on_select.clone();

                            html! {
                                <div key={id.to_string()} class={classes!("chat-item", active_class)} data-id={id.to_string()}
                                    onclick={Callback::from(move |_| on_sel.emit(id))}>
                                    <div class="chat-name">{ &chat.name }</div>
                                    <div class="chat-date">{ &chat.started_at }</div>
                                    if let Some(preview) = chat.last_message.as_ref().filter(|p| !p.is_empty()) {
                                        <div class="chat-preview">{ preview }</div>
                                    }
                                </div>
                            }
                        })}
                    </div>
                </div>
            </div>
        </>
    }
}
