use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::models::NewChatForm;
use crate::state::SubmitPhase;
use crate::utils::spinner;

#[derive(Properties, PartialEq)]
pub struct NewChatModalProps {
    pub draft: NewChatForm,
    pub phase: SubmitPhase,
    pub on_name: Callback<String>,
    pub on_knowledgebase: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

/// Chat creation form. The button is relabelled while the request runs but
/// stays enabled.
#[function_component(NewChatModal)]
pub fn new_chat_modal(props: &NewChatModalProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let on_name_input = {
        let cb = props.on_name.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };

    let on_kb_input = {
        let cb = props.on_knowledgebase.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            cb.emit(input.value());
        })
    };

    html! {
        <Modal title="New chat" on_close={props.on_close.clone()}>
            <form id="new-chat-form" {onsubmit}>
                <label class="form-label">{ "Name" }</label>
                <input class="form-input" type="text" name="new-chat-name"
                    value={props.draft.name.clone()} oninput={on_name_input} />
                <label class="form-label">{ "Knowledgebase" }</label>
                <textarea class="form-textarea" name="new-chat-knowledgebase" rows="8"
                    value={props.draft.knowledgebase.clone()} oninput={on_kb_input} />
                <button type="submit" class="btn btn-primary">
                    if props.phase.is_submitting() {
                        { spinner() }
                        { " Creating chat, stay on this page..." }
                    } else {
                        { "Create" }
                    }
                </button>
            </form>
        </Modal>
    }
}
