pub mod cost;
pub mod coverage;
pub mod printers;

/// Round to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
