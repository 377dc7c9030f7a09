use serde::Serialize;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InkChannel {
    Cyan,
    Magenta,
    Yellow,
    Black,
}

impl InkChannel {
    /// Display order.
    pub const ALL: [InkChannel; 4] = [
        InkChannel::Cyan,
        InkChannel::Magenta,
        InkChannel::Yellow,
        InkChannel::Black,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InkChannel::Cyan => "Cyan",
            InkChannel::Magenta => "Magenta",
            InkChannel::Yellow => "Yellow",
            InkChannel::Black => "Black (K)",
        }
    }

    /// Lowercase key used in form field names and JSON.
    pub fn key(self) -> &'static str {
        match self {
            InkChannel::Cyan => "cyan",
            InkChannel::Magenta => "magenta",
            InkChannel::Yellow => "yellow",
            InkChannel::Black => "black",
        }
    }
}

impl std::fmt::Display for InkChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One value per ink channel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PerChannel<T> {
    pub cyan: T,
    pub magenta: T,
    pub yellow: T,
    pub black: T,
}

impl<T> PerChannel<T> {
    pub fn from_fn(mut f: impl FnMut(InkChannel) -> T) -> Self {
        Self {
            cyan: f(InkChannel::Cyan),
            magenta: f(InkChannel::Magenta),
            yellow: f(InkChannel::Yellow),
            black: f(InkChannel::Black),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (InkChannel, &T)> {
        InkChannel::ALL.into_iter().map(move |ch| (ch, &self[ch]))
    }

    pub fn map<U>(&self, mut f: impl FnMut(InkChannel, &T) -> U) -> PerChannel<U> {
        PerChannel::from_fn(|ch| f(ch, &self[ch]))
    }
}

impl<T: Copy> PerChannel<T> {
    pub const fn uniform(value: T) -> Self {
        Self {
            cyan: value,
            magenta: value,
            yellow: value,
            black: value,
        }
    }
}

impl<T> Index<InkChannel> for PerChannel<T> {
    type Output = T;

    fn index(&self, channel: InkChannel) -> &T {
        match channel {
            InkChannel::Cyan => &self.cyan,
            InkChannel::Magenta => &self.magenta,
            InkChannel::Yellow => &self.yellow,
            InkChannel::Black => &self.black,
        }
    }
}

impl<T> IndexMut<InkChannel> for PerChannel<T> {
    fn index_mut(&mut self, channel: InkChannel) -> &mut T {
        match channel {
            InkChannel::Cyan => &mut self.cyan,
            InkChannel::Magenta => &mut self.magenta,
            InkChannel::Yellow => &mut self.yellow,
            InkChannel::Black => &mut self.black,
        }
    }
}

/// Coverage percentage (0–100, two decimals) per channel.
pub type CoverageResult = PerChannel<f64>;

// --- Reference data ---

#[derive(Debug, Serialize)]
pub struct PrinterProfile {
    pub name: &'static str,
    /// Ink (or toner) consumed per square meter at 100% coverage.
    pub ink_usage_per_m2: PerChannel<f64>,
    pub default_ink_prices: PerChannel<f64>,
    pub ink_unit: &'static str,
}

// --- Per-request ---

#[derive(Debug, Clone)]
pub struct PrintJobConfig {
    pub printer: &'static PrinterProfile,
    pub paper_cost_per_sheet: f64,
    pub markup_fraction: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub ink_prices: PerChannel<f64>,
}

/// Currency amounts at full precision; call [`CostBreakdown::rounded`] at output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub ink_cost: f64,
    pub paper_cost: f64,
    pub total_cost: f64,
    pub final_price: f64,
}

impl CostBreakdown {
    pub fn rounded(&self) -> Self {
        use crate::pipeline::round2;
        Self {
            ink_cost: round2(self.ink_cost),
            paper_cost: round2(self.paper_cost),
            total_cost: round2(self.total_cost),
            final_price: round2(self.final_price),
        }
    }

    /// Labelled amounts in display order.
    pub fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("Ink Cost", self.ink_cost),
            ("Paper Cost", self.paper_cost),
            ("Total Cost", self.total_cost),
            ("Final Price (with Markup)", self.final_price),
        ]
    }
}

// --- API ---

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub id: String,
    pub printer: String,
    pub image: ImageSummary,
    pub coverage: CoverageResult,
    pub channel_ink_costs: PerChannel<f64>,
    pub cost: CostBreakdown,
    pub display: EstimateDisplay,
}

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub format: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Serialize)]
pub struct EstimateDisplay {
    pub coverage: Vec<DisplayRow>,
    pub cost: Vec<DisplayRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayRow {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct PrintersResponse {
    pub printers: Vec<&'static PrinterProfile>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub printers: usize,
    pub uptime_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_channel_indexing_matches_fields() {
        let mut values = PerChannel::from_fn(|ch| ch.key().len());
        assert_eq!(values[InkChannel::Cyan], 4);
        assert_eq!(values[InkChannel::Magenta], 7);
        values[InkChannel::Black] = 0;
        assert_eq!(values.black, 0);
    }

    #[test]
    fn per_channel_iterates_in_display_order() {
        let labels: Vec<_> = PerChannel::uniform(0u8).iter().map(|(ch, _)| ch.label()).collect();
        assert_eq!(labels, ["Cyan", "Magenta", "Yellow", "Black (K)"]);
    }

    #[test]
    fn cost_breakdown_rounds_each_amount_once() {
        let cost = CostBreakdown {
            ink_cost: 1.37937492,
            paper_cost: 2.8,
            total_cost: 4.17937492,
            final_price: 5.433187396,
        };
        let rounded = cost.rounded();
        assert_eq!(rounded.ink_cost, 1.38);
        assert_eq!(rounded.paper_cost, 2.8);
        assert_eq!(rounded.total_cost, 4.18);
        assert_eq!(rounded.final_price, 5.43);
    }

    #[test]
    fn channel_serializes_lowercase() {
        let json = serde_json::to_string(&InkChannel::Black).unwrap();
        assert_eq!(json, "\"black\"");
    }

    #[test]
    fn per_channel_serializes_by_channel_key() {
        let json = serde_json::to_value(PerChannel::from_fn(|ch| ch.key().len())).unwrap();
        assert_eq!(json, serde_json::json!({"cyan": 4, "magenta": 7, "yellow": 6, "black": 5}));
    }
}
