use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::modal::Modal;
use crate::models::ModelsInfo;
use crate::state::{ModelSelection, SubmitPhase};
use crate::utils::spinner;

#[derive(Properties, PartialEq)]
pub struct ModelsInfoBarProps {
    pub info: Option<ModelsInfo>,
    pub on_edit: Callback<()>,
}

#[function_component(ModelsInfoBar)]
pub fn models_info_bar(props: &ModelsInfoBarProps) -> Html {
    let (strong, weak) = match &props.info {
        Some(info) => (info.strong_model_name.clone(), info.weak_model_name.clone()),
        None => ("…".to_string(), "…".to_string()),
    };

    html! {
        <div class="models-bar">
            <span>{ "Strong: " }<b id="strong-model-name">{ strong }</b></span>
            <span>{ "Weak: " }<b id="weak-model-name">{ weak }</b></span>
            <button class="btn" onclick={props.on_edit.reform(|_| ())}>{ "Change models" }</button>
        </div>
    }
}

/// `<option>` list for one select. Each select builds its own from the shared names.
fn model_options(models: &[String], selected: &str) -> Html {
    models
        .iter()
        .map(|m| html! { <option value={m.clone()} selected={m == selected}>{ m }</option> })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct UpdateModelsModalProps {
    pub models: Vec<String>,
    pub selection: ModelSelection,
    pub phase: SubmitPhase,
    pub on_strong: Callback<String>,
    pub on_weak: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(UpdateModelsModal)]
pub fn update_models_modal(props: &UpdateModelsModalProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let select_cb = |cb: &Callback<String>| {
        let cb = cb.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            cb.emit(select.value());
        })
    };

    let busy = props.phase.is_submitting();

    html! {
        <Modal title="Update models" on_close={props.on_close.clone()}>
            <form id="update-models-form" {onsubmit}>
                <label class="form-label">{ "Strong model" }</label>
                <select class="form-select" id="new-strong-model-name" name="new-strong-model-name"
                    onchange={select_cb(&props.on_strong)}>
                    { model_options(&props.models, &props.selection.strong) }
                </select>
                <label class="form-label">{ "Weak model" }</label>
                <select class="form-select" id="new-weak-model-name" name="new-weak-model-name"
                    onchange={select_cb(&props.on_weak)}>
                    { model_options(&props.models, &props.selection.weak) }
                </select>
                <button type="submit" class="btn btn-primary" disabled={busy}>
                    if busy { { spinner() } } else { { "Save" } }
                </button>
            </form>
        </Modal>
    }
}
