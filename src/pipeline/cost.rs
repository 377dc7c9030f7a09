use crate::models::{CostBreakdown, CoverageResult, PerChannel, PrintJobConfig};

pub const MM_PER_INCH: f64 = 25.4;

pub fn inches_to_mm(inches: f64) -> f64 {
    inches * MM_PER_INCH
}

/// Printable area in square meters.
pub fn print_area_m2(width_mm: f64, height_mm: f64) -> f64 {
    (width_mm / 1000.0) * (height_mm / 1000.0)
}

/// Ink cost of each channel at full precision.
pub fn channel_ink_costs(coverage: &CoverageResult, job: &PrintJobConfig) -> PerChannel<f64> {
    let area = print_area_m2(job.width_mm, job.height_mm);
    coverage.map(|channel, percent| {
        (percent / 100.0) * area * job.printer.ink_usage_per_m2[channel] * job.ink_prices[channel]
    })
}

/// Ink + paper cost and the marked-up price. Nothing is rounded here.
pub fn compute_cost(coverage: &CoverageResult, job: &PrintJobConfig) -> CostBreakdown {
    breakdown(&channel_ink_costs(coverage, job), job)
}

/// Totals from per-channel ink costs that were already computed.
pub fn breakdown(channel_costs: &PerChannel<f64>, job: &PrintJobConfig) -> CostBreakdown {
    let ink_cost: f64 = channel_costs.iter().map(|(_, c)| c).sum();
    let total_cost = ink_cost + job.paper_cost_per_sheet;
    CostBreakdown {
        ink_cost,
        paper_cost: job.paper_cost_per_sheet,
        total_cost,
        final_price: total_cost * (1.0 + job.markup_fraction),
    }
}
