use log::{Level, LevelFilter, Log, Metadata, Record};
use pulldown_cmark::{html, Event as MdEvent, Options, Parser};
use yew::{AttrValue, Html};

pub fn set_panic_hook() {
    // Panics show up in the browser console instead of "unreachable executed".
    console_error_panic_hook::set_once();
}

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = wasm_bindgen::JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

pub fn render_markdown(text: &str) -> Html {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let html_output = markdown_to_html(text, options);
    let styled_html = format!(r#"<div class="markdown-body">{}</div>"#, html_output);
    Html::from_html_unchecked(AttrValue::from(styled_html))
}

fn markdown_to_html(text: &str, options: Options) -> String {
    let parser = Parser::new_ext(text, options).map(|event| match event {
        MdEvent::SoftBreak => MdEvent::HardBreak,
        _ => event,
    });

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

pub fn spinner() -> Html {
    yew::html! {
        <span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_breaks_become_line_breaks() {
        let out = markdown_to_html("first\nsecond", Options::empty());
        assert!(out.contains("<br />"));
    }

    #[test]
    fn tables_are_rendered() {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        let out = markdown_to_html("| a | b |\n|---|---|\n| 1 | 2 |", options);
        assert!(out.contains("<table>"));
    }
}
