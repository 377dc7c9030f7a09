use anyhow::{ensure, Context, Result};
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub templates_dir: String,
    pub static_dir: String,
    pub currency_symbol: String,
    pub default_paper_cost: f64,
    pub default_markup_percent: f64,
    pub default_width_in: f64,
    pub default_height_in: f64,
    pub max_upload_bytes: usize,
}

pub const MAX_MARKUP_PERCENT: f64 = 500.0;
pub const MIN_PRINT_SIZE_IN: f64 = 0.1;

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8890,
            templates_dir: "templates".into(),
            static_dir: "static".into(),
            currency_symbol: "₱".into(),
            default_paper_cost: 2.8,
            default_markup_percent: 30.0,
            // A4
            default_width_in: 8.27,
            default_height_in: 11.69,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            templates_dir: env_or("TEMPLATES_DIR", defaults.templates_dir)?,
            static_dir: env_or("STATIC_DIR", defaults.static_dir)?,
            currency_symbol: env_or("CURRENCY_SYMBOL", defaults.currency_symbol)?,
            default_paper_cost: env_or("DEFAULT_PAPER_COST", defaults.default_paper_cost)?,
            default_markup_percent: env_or(
                "DEFAULT_MARKUP_PERCENT",
                defaults.default_markup_percent,
            )?,
            default_width_in: env_or("DEFAULT_WIDTH_IN", defaults.default_width_in)?,
            default_height_in: env_or("DEFAULT_HEIGHT_IN", defaults.default_height_in)?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.default_paper_cost.is_finite() && self.default_paper_cost >= 0.0,
            "DEFAULT_PAPER_COST must be a non-negative number"
        );
        ensure!(
            (0.0..=MAX_MARKUP_PERCENT).contains(&self.default_markup_percent),
            "DEFAULT_MARKUP_PERCENT must be between 0 and {}",
            MAX_MARKUP_PERCENT
        );
        for (key, value) in [
            ("DEFAULT_WIDTH_IN", self.default_width_in),
            ("DEFAULT_HEIGHT_IN", self.default_height_in),
        ] {
            ensure!(
                value.is_finite() && value >= MIN_PRINT_SIZE_IN,
                "{} must be at least {} inches",
                key,
                MIN_PRINT_SIZE_IN
            );
        }
        ensure!(self.max_upload_bytes > 0, "MAX_UPLOAD_BYTES must be positive");
        Ok(())
    }
}
