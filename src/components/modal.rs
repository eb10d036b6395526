use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: AttrValue,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

/// Dialog shell; whether it is shown is decided by the parent.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let css = r#"
        .modal-backdrop { position: fixed; top: 0; left: 0; width: 100%; height: 100%; background: rgba(255,255,255,0.6); backdrop-filter: blur(2px); z-index: 99; cursor: pointer; }
        .modal-panel { position: fixed; top: 80px; left: 50%; transform: translateX(-50%); width: 520px; max-width: calc(100% - 40px); max-height: calc(100vh - 120px); overflow-y: auto; background: white; border: 1px solid var(--border-color); border-radius: 8px; box-shadow: 0 10px 15px -3px rgba(0, 0, 0, 0.1); padding: 20px; z-index: 100; display: flex; flex-direction: column; gap: 15px; }
        .modal-header { display: flex; justify-content: space-between; align-items: center; border-bottom: 1px solid var(--border-color); padding-bottom: 10px; }
        .modal-header h3 { margin: 0; font-size: 1.1rem; }
        .modal-body pre { white-space: pre-wrap; word-break: break-word; font-size: 0.85rem; background: #f7f7f7; padding: 10px; border-radius: 6px; margin: 0; }
        .close-btn { background: none; border: none; font-size: 1.5rem; line-height: 1; cursor: pointer; color: var(--text-secondary); padding: 0 5px; }
        .close-btn:hover { color: var(--text-primary); }
    "#;

    html! {
        <>
            <style>{ css }</style>
            <div class="modal-backdrop" onclick={props.on_close.reform(|_| ())}></div>
            <div class="modal-panel" role="dialog">
                <div class="modal-header">
                    <h3>{ props.title.to_string() }</h3>
                    <button class="close-btn" onclick={props.on_close.reform(|_| ())} title="Close">{ "×" }</button>
                </div>
                <div class="modal-body">
                    { for props.children.iter() }
                </div>
            </div>
        </>
    }
}

#[derive(Properties, PartialEq)]
pub struct MetadataModalProps {
    pub json: AttrValue,
    pub on_close: Callback<()>,
}

#[function_component(MetadataModal)]
pub fn metadata_modal(props: &MetadataModalProps) -> Html {
    html! {
        <Modal title="Message metadata" on_close={props.on_close.clone()}>
            <pre>{ props.json.to_string() }</pre>
        </Modal>
    }
}
