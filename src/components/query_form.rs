use web_sys::{HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::models::{ChatId, OptimizationMetric};
use crate::state::SubmitPhase;
use crate::utils::spinner;

#[derive(Properties, PartialEq)]
pub struct NewMessageFormProps {
    pub chat_id: Option<ChatId>,
    pub query: AttrValue,
    pub metric: OptimizationMetric,
    /// Renders the optimization metric selector and sends its value.
    pub show_metric: bool,
    pub phase: SubmitPhase,
    pub on_edit: Callback<String>,
    pub on_metric: Callback<OptimizationMetric>,
    pub on_submit: Callback<()>,
}

#[function_component(NewMessageForm)]
pub fn new_message_form(props: &NewMessageFormProps) -> Html {
    let busy = props.phase.is_submitting();

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let oninput = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            on_edit.emit(input.value());
        })
    };

    let onkeydown = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" && !e.shift_key() {
                e.prevent_default();
                if !busy {
                    on_submit.emit(());
                }
            }
        })
    };

    let onchange = {
        let on_metric = props.on_metric.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(metric) = OptimizationMetric::parse(&select.value()) {
                on_metric.emit(metric);
            }
        })
    };

    let chat_id_value = props.chat_id.map(|id| id.to_string()).unwrap_or_default();

    html! {
        <div class="input-wrapper">
            <form class="input-container" id="new-message-form" {onsubmit}>
                <input type="hidden" name="chat-id" value={chat_id_value} />
                if props.show_metric {
                    <select class="form-select metric-select" name="optimization-metric" {onchange}>
                        { for OptimizationMetric::ALL.iter().map(|m| html! {
                            <option value={m.as_str()} selected={*m == props.metric}>{ m.as_str() }</option>
                        })}
                    </select>
                }
                <textarea
                    class="chat-input"
                    name="new-message"
                    rows="2"
                    placeholder="Ask something..."
                    value={props.query.clone()}
                    {oninput}
                    {onkeydown}
                />
                <button type="submit" class="send-btn" disabled={busy}>
                    if busy { { spinner() } } else { { "Send" } }
                </button>
            </form>
        </div>
    }
}
