use crate::models::{CostBreakdown, CoverageResult, DisplayRow, PerChannel};
use crate::pipeline::round2;

// Strings are built from round2 so they always agree with the rounded JSON numbers.

pub fn percent(value: f64) -> String {
    format!("{:.2}%", round2(value))
}

pub fn currency(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, round2(amount))
}

/// Up to two decimals, without trailing zeros (`12.5`, `30`).
pub fn number(value: f64) -> String {
    let fixed = format!("{:.2}", round2(value));
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn coverage_rows(coverage: &CoverageResult) -> Vec<DisplayRow> {
    coverage
        .iter()
        .map(|(channel, value)| DisplayRow {
            label: channel.label().to_string(),
            value: percent(*value),
        })
        .collect()
}

pub fn channel_cost_rows(symbol: &str, costs: &PerChannel<f64>) -> Vec<DisplayRow> {
    costs
        .iter()
        .map(|(channel, cost)| DisplayRow {
            label: channel.label().to_string(),
            value: currency(symbol, *cost),
        })
        .collect()
}

pub fn cost_rows(symbol: &str, cost: &CostBreakdown) -> Vec<DisplayRow> {
    cost.labelled()
        .into_iter()
        .map(|(label, amount)| DisplayRow {
            label: label.to_string(),
            value: currency(symbol, amount),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimals() {
        assert_eq!(percent(100.0), "100.00%");
        assert_eq!(percent(12.3), "12.30%");
        assert_eq!(currency("₱", 5.433187396), "₱5.43");
        assert_eq!(currency("$", 2.8), "$2.80");
    }

    #[test]
    fn halves_round_the_same_as_json() {
        for amount in [0.125, 1.125, 2.625] {
            let cost = CostBreakdown {
                ink_cost: 0.0,
                paper_cost: amount,
                total_cost: amount,
                final_price: amount,
            };
            let shown = cost_rows("₱", &cost);
            let json = cost.rounded();
            assert_eq!(shown[1].value, format!("₱{:.2}", json.paper_cost), "{amount}");
        }
        assert_eq!(currency("₱", 1.125), "₱1.13");
        assert_eq!(percent(12.345), percent(round2(12.345)));
    }

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(30.0), "30");
        assert_eq!(number(0.0), "0");
        assert_eq!(number(7.25), "7.25");
    }

    #[test]
    fn cost_rows_are_labelled_in_order() {
        let cost = CostBreakdown {
            ink_cost: 1.37937492,
            paper_cost: 2.8,
            total_cost: 4.17937492,
            final_price: 5.433187396,
        };
        let rows = cost_rows("₱", &cost);
        let rendered: Vec<_> = rows.iter().map(|r| format!("{}: {}", r.label, r.value)).collect();
        assert_eq!(
            rendered,
            [
                "Ink Cost: ₱1.38",
                "Paper Cost: ₱2.80",
                "Total Cost: ₱4.18",
                "Final Price (with Markup): ₱5.43",
            ]
        );
    }

    #[test]
    fn coverage_rows_use_channel_labels() {
        let rows = coverage_rows(&PerChannel { black: 49.8, ..PerChannel::uniform(0.0) });
        assert_eq!(rows[3].label, "Black (K)");
        assert_eq!(rows[3].value, "49.80%");
        assert_eq!(rows[0].value, "0.00%");
    }
}
