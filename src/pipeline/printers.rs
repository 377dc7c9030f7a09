use crate::models::{PerChannel, PrinterProfile};

/// Supported printers. The first entry is the default selection.
pub static PRINTERS: [PrinterProfile; 2] = [
    PrinterProfile {
        name: "Epson Workforce C5290",
        ink_usage_per_m2: PerChannel::uniform(55.29),
        default_ink_prices: PerChannel::uniform(1.0),
        ink_unit: "mL",
    },
    PrinterProfile {
        name: "Xerox VersaLink C405",
        ink_usage_per_m2: PerChannel::uniform(0.332),
        default_ink_prices: PerChannel::uniform(331.75),
        ink_unit: "toner unit",
    },
];

pub fn default_printer() -> &'static PrinterProfile {
    &PRINTERS[0]
}

pub fn find_printer(name: &str) -> Option<&'static PrinterProfile> {
    let name = name.trim();
    PRINTERS.iter().find(|p| p.name == name)
}
