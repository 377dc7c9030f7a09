use crate::error::AppError;
use crate::models::InkChannel;
use crate::pipeline::printers::PRINTERS;
use crate::state::AppState;
use axum::extract::State;
use axum::response::Html;
use serde_json::json;

/// GET /: upload form, pre-filled with configured defaults and the first printer's ink prices.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let config = &state.config;

    let printers: Vec<_> = PRINTERS
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "ink_unit": p.ink_unit,
                "prices": p.default_ink_prices,
            })
        })
        .collect();

    let default_printer = &PRINTERS[0];
    let channels: Vec<_> = InkChannel::ALL
        .iter()
        .map(|ch| {
            json!({
                "key": ch.key(),
                "label": ch.label(),
                "price": default_printer.default_ink_prices[*ch],
            })
        })
        .collect();

    let mut ctx = tera::Context::new();
    ctx.insert("printers", &printers);
    ctx.insert("channels", &channels);
    ctx.insert("ink_unit", default_printer.ink_unit);
    ctx.insert("currency_symbol", &config.currency_symbol);
    ctx.insert("paper_cost", &config.default_paper_cost);
    ctx.insert("markup_percent", &config.default_markup_percent);
    ctx.insert("width_in", &config.default_width_in);
    ctx.insert("height_in", &config.default_height_in);

    let html = state.tera.render("index.html", &ctx)?;
    Ok(Html(html))
}
