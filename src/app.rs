use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::modal::MetadataModal;
use crate::components::models_panel::{ModelsInfoBar, UpdateModelsModal};
use crate::components::new_chat::NewChatModal;
use crate::components::query_form::NewMessageForm;
use crate::components::sidebar::Sidebar;
use crate::components::transcript::Transcript;
use crate::config::AppConfig;
use crate::models::{ChatId, Message, OptimizationMetric};
use crate::services::api::ApiClient;
use crate::services::controller::{ChatController, UiHost};
use crate::state::{ModalView, SessionAction, SessionState};

const GLOBAL_STYLES: &str = r#"
    :root {
        --bg-app: #ffffff;
        --bg-sidebar: #f9f9f9;
        --border-color: #e5e5e5;
        --text-primary: #333;
        --text-secondary: #666;
        --accent-color: #10a37f;
        --accent-hover: #1a7f64;
        --danger-color: #ef4444;
    }

    * { box-sizing: border-box; }
    body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif; color: var(--text-primary); }

    .app-container { display: flex; height: 100vh; overflow: hidden; }
    .main-content { flex-grow: 1; display: flex; flex-direction: column; position: relative; background: var(--bg-app); min-width: 0; }
    .header { padding: 10px 20px; border-bottom: 1px solid var(--border-color); display: flex; align-items: center; height: 60px; }
    .models-bar { display: flex; gap: 20px; align-items: center; padding: 8px 20px; border-bottom: 1px solid var(--border-color); font-size: 0.85rem; color: var(--text-secondary); }
    .models-bar .btn { margin-left: auto; }

    .btn { cursor: pointer; border: 1px solid var(--border-color); background: white; padding: 8px 12px; border-radius: 6px; font-size: 0.9rem; transition: all 0.2s; color: var(--text-primary); }
    .btn:hover { background: #f0f0f0; }
    .btn-primary { background: var(--accent-color); color: white; border-color: transparent; }
    .btn-primary:hover { background: var(--accent-hover); }
    .btn:disabled { background: #ccc; cursor: default; }

    .form-label { display: block; font-size: 0.85rem; font-weight: 600; margin-bottom: 5px; color: var(--text-secondary); }
    .form-input, .form-select, .form-textarea { width: 100%; padding: 8px; border: 1px solid var(--border-color); border-radius: 6px; font-family: inherit; margin-bottom: 10px; }
    .form-input:focus, .form-textarea:focus { outline: 2px solid var(--accent-color); border-color: transparent; }

    .input-wrapper { border-top: 1px solid var(--border-color); padding: 20px; display: flex; justify-content: center; background: white; }
    .input-container { width: 100%; max-width: 900px; position: relative; display: flex; flex-direction: column; gap: 8px; }
    .metric-select { width: 200px; margin-bottom: 0; }
    .chat-input { width: 100%; padding: 12px; padding-right: 70px; border: 1px solid var(--border-color); border-radius: 8px; resize: none; font-family: inherit; outline: none; }
    .chat-input:focus { border-color: var(--accent-color); }
    .send-btn { position: absolute; right: 8px; bottom: 8px; background: var(--accent-color); color: white; border: none; border-radius: 4px; padding: 6px 10px; cursor: pointer; min-width: 52px; }
    .send-btn:disabled { background: #ccc; cursor: default; }

    .spinner-border { display: inline-block; width: 1rem; height: 1rem; vertical-align: text-bottom; border: 0.2em solid currentColor; border-right-color: transparent; border-radius: 50%; animation: spinner-border 0.75s linear infinite; }
    .spinner-border-sm { width: 0.8rem; height: 0.8rem; border-width: 0.15em; }
    @keyframes spinner-border { to { transform: rotate(360deg); } }

    .markdown-body { line-height: 1.6; font-size: 1rem; }
    .markdown-body pre { background: #2d2d2d; color: #fff; padding: 15px; border-radius: 6px; overflow-x: auto; }
    .markdown-body code { background: #f4f4f4; padding: 2px 4px; border-radius: 4px; font-family: monospace; font-size: 0.9em; }
    .markdown-body pre code { background: transparent; color: inherit; }
    .markdown-body p { margin-top: 0; margin-bottom: 1em; }
"#;

/// Page side of [`UiHost`]: reducer dispatch plus `window.alert`.
#[derive(Clone)]
struct BrowserHost {
    dispatcher: UseReducerDispatcher<SessionState>,
}

impl UiHost for BrowserHost {
    fn dispatch(&self, action: SessionAction) {
        self.dispatcher.dispatch(action);
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            window.alert_with_message(message).ok();
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: AppConfig,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let config = props.config.clone();
    let state = use_reducer(SessionState::default);
    let controller = use_memo(config.api_base.clone(), |base| ChatController::new(ApiClient::new(base)));
    let host = BrowserHost { dispatcher: state.dispatcher() };

    // --- EFFECTS ---
    {
        let controller = controller.clone();
        let host = host.clone();
        let routing = config.model_routing;
        use_effect_with((), move |_| {
            let ctrl = (*controller).clone();
            spawn_local(async move {
                if routing {
                    futures_util::join!(
                        ctrl.load_chats(&host),
                        ctrl.load_models_info(&host, None),
                        ctrl.load_all_models(&host)
                    );
                } else {
                    ctrl.load_chats(&host).await;
                }
            });
        });
    }

    // --- ACTIONS ---
    let on_select_chat = {
        let controller = controller.clone();
        let host = host.clone();
        Callback::from(move |chat_id: ChatId| {
            let ctrl = (*controller).clone();
            let host = host.clone();
            spawn_local(async move { ctrl.load_chat(&host, chat_id).await });
        })
    };

    let on_create = {
        let controller = controller.clone();
        let host = host.clone();
        let draft = state.new_chat.clone();
        Callback::from(move |_: ()| {
            let ctrl = (*controller).clone();
            let host = host.clone();
            let draft = draft.clone();
            spawn_local(async move {
                ctrl.create_chat(&host, draft).await;
            });
        })
    };

    // The controller's guard, not the button, decides whether this goes out.
    let on_query = {
        let controller = controller.clone();
        let host = host.clone();
        let chat_id = state.current_chat_id;
        let query = state.query.clone();
        let metric = config.model_routing.then_some(state.metric);
        Callback::from(move |_: ()| {
            let ctrl = (*controller).clone();
            let host = host.clone();
            let query = query.clone();
            spawn_local(async move {
                ctrl.submit_query(&host, chat_id, query, metric).await;
            });
        })
    };

    let on_update_models = {
        let controller = controller.clone();
        let host = host.clone();
        let selection = state.selection.clone();
        Callback::from(move |_: ()| {
            let ctrl = (*controller).clone();
            let host = host.clone();
            let selection = selection.clone();
            spawn_local(async move {
                ctrl.update_models(&host, selection).await;
            });
        })
    };

    let dispatch = |f: fn(String) -> SessionAction| {
        let d = state.dispatcher();
        Callback::from(move |value: String| d.dispatch(f(value)))
    };

    let on_message_click = {
        let d = state.dispatcher();
        Callback::from(move |message: Message| d.dispatch(SessionAction::OpenModal(ModalView::Metadata(message.metadata_json()))))
    };
    let on_metric = {
        let d = state.dispatcher();
        Callback::from(move |metric: OptimizationMetric| d.dispatch(SessionAction::SelectMetric(metric)))
    };
    let open_modal = |view: ModalView| {
        let d = state.dispatcher();
        Callback::from(move |_: ()| d.dispatch(SessionAction::OpenModal(view.clone())))
    };
    let close_modal = {
        let d = state.dispatcher();
        Callback::from(move |_: ()| d.dispatch(SessionAction::CloseModal))
    };

    let modal = match &state.modal {
        Some(ModalView::NewChat) => html! {
            <NewChatModal
                draft={state.new_chat.clone()}
                phase={state.create_phase}
                on_name={dispatch(SessionAction::EditNewChatName)}
                on_knowledgebase={dispatch(SessionAction::EditKnowledgebase)}
                on_submit={on_create}
                on_close={close_modal.clone()}
            />
        },
        Some(ModalView::UpdateModels) => html! {
            <UpdateModelsModal
                models={state.models.clone()}
                selection={state.selection.clone()}
                phase={state.update_phase}
                on_strong={dispatch(SessionAction::SelectStrongModel)}
                on_weak={dispatch(SessionAction::SelectWeakModel)}
                on_submit={on_update_models}
                on_close={close_modal.clone()}
            />
        },
        Some(ModalView::Metadata(json)) => html! {
            <MetadataModal json={json.clone()} on_close={close_modal.clone()} />
        },
        None => html! {},
    };

    html! {
        <>
            <style>{ GLOBAL_STYLES }</style>
            <div class="app-container">
                <Sidebar
                    chats={state.chats.clone()}
                    active_chat_id={state.current_chat_id}
                    on_select={on_select_chat}
                    on_new={open_modal(ModalView::NewChat)}
                />

                <div class="main-content" id="chat-interface">
                    if config.model_routing {
                        <ModelsInfoBar info={state.models_info.clone()} on_edit={open_modal(ModalView::UpdateModels)} />
                    }

                    <Transcript
                        chat_name={state.chat_name.clone()}
                        messages={state.transcript.clone()}
                        render_mode={config.render_mode}
                        scroll_generation={state.scroll_generation}
                        on_message_click={on_message_click}
                    />

                    <NewMessageForm
                        chat_id={state.current_chat_id}
                        query={state.query.clone()}
                        metric={state.metric}
                        show_metric={config.model_routing}
                        phase={state.query_phase}
                        on_edit={dispatch(SessionAction::EditQuery)}
                        on_metric={on_metric}
                        on_submit={on_query}
                    />
                </div>
            </div>
            { modal }
        </>
    }
}
