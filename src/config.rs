use anyhow::{anyhow, Context, Result};
use log::LevelFilter;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RenderMode {
    Raw,
    #[default]
    Markdown,
}

impl std::str::FromStr for RenderMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "text" => Ok(RenderMode::Raw),
            "markdown" | "md" => Ok(RenderMode::Markdown),
            other => Err(anyhow!("unknown render mode '{}'", other)),
        }
    }
}

/// Page-level settings, read once from `data-*` attributes on `<body>`.
#[derive(Clone, PartialEq, Debug)]
pub struct AppConfig {
    pub api_base: String,
    pub render_mode: RenderMode,
    /// Strong/weak model panel and the optimization metric selector.
    pub model_routing: bool,
    pub log_level: LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            render_mode: RenderMode::Markdown,
            model_routing: true,
            log_level: LevelFilter::Info,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "1" | "yes" => Ok(true),
        "false" | "off" | "0" | "no" => Ok(false),
        other => Err(anyhow!("expected a boolean, got '{}'", other)),
    }
}

impl AppConfig {
    /// Builds the config from an attribute lookup. Bad values are reported
    /// and replaced by defaults.
    pub fn from_attributes(origin: &str, attr: impl Fn(&str) -> Option<String>) -> (Self, Vec<String>) {
        let mut config = AppConfig {
            api_base: origin.trim_end_matches('/').to_string(),
            ..Default::default()
        };
        let mut warnings = Vec::new();

        if let Some(base) = attr("data-api-base").filter(|b| !b.trim().is_empty()) {
            config.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(raw) = attr("data-render-mode") {
            match raw.parse() {
                Ok(mode) => config.render_mode = mode,
                Err(e) => warnings.push(format!("data-render-mode: {}", e)),
            }
        }
        if let Some(raw) = attr("data-model-routing") {
            match parse_flag(&raw) {
                Ok(flag) => config.model_routing = flag,
                Err(e) => warnings.push(format!("data-model-routing: {}", e)),
            }
        }
        if let Some(raw) = attr("data-log-level") {
            match raw.trim().parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(e) => warnings.push(format!("data-log-level: {}", e)),
            }
        }

        (config, warnings)
    }

    pub fn from_page() -> Result<(Self, Vec<String>)> {
        let window = web_sys::window().context("window is unavailable")?;
        let origin = window
            .location()
            .origin()
            .map_err(|e| anyhow!("{:?}", e))
            .context("reading page origin")?;
        let body = window.document().and_then(|d| d.body());

        Ok(Self::from_attributes(&origin, |name| {
            body.as_ref().and_then(|b| b.get_attribute(name))
        }))
    }
}
