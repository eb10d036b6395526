mod app;
mod components;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
mod utils;

use wasm_bindgen::prelude::*;
use app::{App, AppProps};
use config::AppConfig;

#[wasm_bindgen(start)]
pub fn run_app() {
    utils::set_panic_hook();

    let config = match AppConfig::from_page() {
        Ok((config, warnings)) => {
            utils::init_logging(config.log_level);
            for warning in warnings {
                log::warn!("Ignoring page setting {}", warning);
            }
            config
        }
        Err(e) => {
            utils::init_logging(log::LevelFilter::Info);
            log::error!("Falling back to default config: {:#}", e);
            AppConfig::default()
        }
    };

    log::info!("Document loaded, talking to '{}'", config.api_base);
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
