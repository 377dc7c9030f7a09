use crate::config::{Config, MAX_MARKUP_PERCENT, MIN_PRINT_SIZE_IN};
use crate::error::AppError;
use crate::models::{InkChannel, PerChannel, PrintJobConfig};
use crate::pipeline::cost::inches_to_mm;
use crate::pipeline::printers;
use axum::extract::Multipart;

pub const IMAGE_FIELD: &str = "image";

#[derive(Debug)]
pub struct Upload {
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Fields of the estimate form. Empty or missing numbers fall back to defaults.
#[derive(Debug, Default)]
pub struct EstimateForm {
    pub printer: Option<String>,
    pub paper_cost: Option<f64>,
    pub markup_percent: Option<f64>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    pub ink_prices: PerChannel<Option<f64>>,
    pub image: Option<Upload>,
}

fn parse_number(field: &str, raw: &str) -> Result<Option<f64>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::InvalidConfig(format!("{} must be a number, got {:?}", field, raw)))?;
    if !value.is_finite() {
        return Err(AppError::InvalidConfig(format!("{} must be a finite number", field)));
    }
    Ok(Some(value))
}

fn ink_price_channel(field: &str) -> Option<InkChannel> {
    let key = field.strip_prefix("ink_price_")?;
    InkChannel::ALL.into_iter().find(|ch| ch.key() == key)
}

impl EstimateForm {
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = EstimateForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == IMAGE_FIELD {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?.to_vec();
                form.image = Some(Upload { file_name, bytes });
                continue;
            }

            let text = field.text().await?;
            match name.as_str() {
                "printer" => form.printer = Some(text),
                "paper_cost" => form.paper_cost = parse_number("paper cost", &text)?,
                "markup_percent" => form.markup_percent = parse_number("markup", &text)?,
                "width_in" => form.width_in = parse_number("print width", &text)?,
                "height_in" => form.height_in = parse_number("print height", &text)?,
                other => match ink_price_channel(other) {
                    Some(channel) => {
                        let label = format!("{} ink price", channel.label());
                        form.ink_prices[channel] = parse_number(&label, &text)?;
                    }
                    None => tracing::debug!(field = %other, "Ignoring unknown form field"),
                },
            }
        }

        Ok(form)
    }

    /// Resolve defaults and validate everything the cost calculation assumes.
    pub fn job_config(&self, config: &Config) -> Result<PrintJobConfig, AppError> {
        let printer = match self.printer.as_deref().map(str::trim) {
            None | Some("") => printers::default_printer(),
            Some(name) => printers::find_printer(name)
                .ok_or_else(|| AppError::InvalidConfig(format!("unknown printer {:?}", name)))?,
        };

        let paper_cost = self.paper_cost.unwrap_or(config.default_paper_cost);
        if paper_cost < 0.0 {
            return Err(AppError::InvalidConfig("paper cost must not be negative".into()));
        }

        let markup_percent = self.markup_percent.unwrap_or(config.default_markup_percent);
        if !(0.0..=MAX_MARKUP_PERCENT).contains(&markup_percent) {
            return Err(AppError::InvalidConfig(format!(
                "markup must be between 0 and {}%",
                MAX_MARKUP_PERCENT
            )));
        }

        let width_in = self.width_in.unwrap_or(config.default_width_in);
        let height_in = self.height_in.unwrap_or(config.default_height_in);
        if width_in < MIN_PRINT_SIZE_IN || height_in < MIN_PRINT_SIZE_IN {
            return Err(AppError::InvalidConfig(format!(
                "print width and height must be at least {} inches",
                MIN_PRINT_SIZE_IN
            )));
        }

        let mut ink_prices = printer.default_ink_prices;
        for (channel, price) in self.ink_prices.iter() {
            if let Some(price) = *price {
                if price < 0.0 {
                    return Err(AppError::InvalidConfig(format!(
                        "{} ink price must not be negative",
                        channel.label()
                    )));
                }
                ink_prices[channel] = price;
            }
        }

        Ok(PrintJobConfig {
            printer,
            paper_cost_per_sheet: paper_cost,
            markup_fraction: markup_percent / 100.0,
            width_mm: inches_to_mm(width_in),
            height_mm: inches_to_mm(height_in),
            ink_prices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_form_uses_defaults() {
        let job = EstimateForm::default().job_config(&Config::default()).unwrap();
        assert_eq!(job.printer.name, "Epson Workforce C5290");
        assert_eq!(job.paper_cost_per_sheet, 2.8);
        assert_eq!(job.markup_fraction, 0.3);
        assert!((job.width_mm - 210.058).abs() < 1e-9);
        assert!((job.height_mm - 296.926).abs() < 1e-9);
        assert_eq!(job.ink_prices, PerChannel::uniform(1.0));
    }

    #[test]
    fn ink_price_overrides_replace_printer_defaults() {
        let form = EstimateForm {
            printer: Some("Xerox VersaLink C405".into()),
            ink_prices: PerChannel {
                yellow: Some(300.0),
                ..PerChannel::default()
            },
            ..EstimateForm::default()
        };
        let job = form.job_config(&Config::default()).unwrap();
        assert_eq!(job.ink_prices.yellow, 300.0);
        assert_eq!(job.ink_prices.cyan, 331.75);
    }

    #[test]
    fn rejects_out_of_range_input() {
        let config = Config::default();
        let cases = [
            EstimateForm { paper_cost: Some(-0.01), ..Default::default() },
            EstimateForm { markup_percent: Some(500.5), ..Default::default() },
            EstimateForm { markup_percent: Some(-1.0), ..Default::default() },
            EstimateForm { width_in: Some(0.0), ..Default::default() },
            EstimateForm { printer: Some("Canon".into()), ..Default::default() },
            EstimateForm {
                ink_prices: PerChannel { black: Some(-2.0), ..Default::default() },
                ..Default::default()
            },
        ];
        for form in cases {
            let err = form.job_config(&config).unwrap_err();
            assert!(matches!(err, AppError::InvalidConfig(_)), "{:?}", form);
        }
    }

    #[test]
    fn markup_bounds_are_inclusive() {
        let form = EstimateForm { markup_percent: Some(500.0), ..Default::default() };
        let job = form.job_config(&Config::default()).unwrap();
        assert_eq!(job.markup_fraction, 5.0);
    }

    #[test]
    fn parses_numbers_leniently() {
        assert_eq!(parse_number("x", " 2.5 ").unwrap(), Some(2.5));
        assert_eq!(parse_number("x", "").unwrap(), None);
        assert!(parse_number("x", "abc").is_err());
        assert!(parse_number("x", "NaN").is_err());
        assert!(parse_number("x", "inf").is_err());
    }

    #[test]
    fn maps_ink_price_fields() {
        assert_eq!(ink_price_channel("ink_price_black"), Some(InkChannel::Black));
        assert_eq!(ink_price_channel("ink_price_orange"), None);
        assert_eq!(ink_price_channel("cyan"), None);
    }
}
