use crate::config::Config;
use anyhow::{Context, Result};
use std::sync::Arc;
use tera::Tera;

/// Read-only after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub tera: Arc<Tera>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let glob = format!("{}/**/*.html", config.templates_dir.trim_end_matches('/'));
        let tera = Tera::new(&glob).with_context(|| format!("loading templates from {}", glob))?;
        tracing::info!(
            "Templates loaded: {:?}",
            tera.get_template_names().collect::<Vec<_>>()
        );

        Ok(AppState {
            tera: Arc::new(tera),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
pub fn test_state() -> AppState {
    let config = Config {
        templates_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/templates").into(),
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").into(),
        ..Config::default()
    };
    AppState::new(config).expect("templates should load")
}
