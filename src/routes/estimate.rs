use crate::error::AppError;
use crate::models::{
    CostBreakdown, CoverageResult, EstimateDisplay, EstimateResponse, ImageSummary, PerChannel,
    PrintJobConfig,
};
use crate::pipeline::{cost, coverage, round2};
use crate::routes::form::EstimateForm;
use crate::routes::format;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use base64::Engine;
use image::ImageFormat;
use tracing::Instrument;

/// Everything computed for one upload.
pub struct Estimate {
    pub id: uuid::Uuid,
    pub file_name: Option<String>,
    pub job: PrintJobConfig,
    pub format: ImageFormat,
    pub dimensions: (u32, u32),
    pub coverage: CoverageResult,
    pub channel_ink_costs: PerChannel<f64>,
    pub cost: CostBreakdown,
    pub bytes: Vec<u8>,
}

impl Estimate {
    fn image_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.to_mime_type(),
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

async fn run_estimate(state: &AppState, multipart: Multipart) -> Result<Estimate, AppError> {
    let form = EstimateForm::from_multipart(multipart).await?;
    let job = form.job_config(&state.config)?;
    let upload = form
        .image
        .ok_or_else(|| AppError::BadRequest("no image uploaded".into()))?;

    let id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("estimate", %id, printer = job.printer.name);

    async move {
        tracing::info!(
            file = upload.file_name.as_deref().unwrap_or("-"),
            bytes = upload.bytes.len(),
            "Processing upload"
        );

        let bytes = upload.bytes;
        let (decoded, coverage, bytes) = tokio::task::spawn_blocking(move || {
            let decoded = coverage::decode_image(&bytes)?;
            let coverage = coverage::estimate(&decoded.pixels);
            Ok::<_, coverage::DecodeError>((decoded, coverage, bytes))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Estimate task failed: {}", e)))??;
        let dimensions = decoded.pixels.dimensions();

        let channel_ink_costs = cost::channel_ink_costs(&coverage, &job);
        let breakdown = cost::breakdown(&channel_ink_costs, &job);

        tracing::info!(
            width = dimensions.0,
            height = dimensions.1,
            cyan = coverage.cyan,
            magenta = coverage.magenta,
            yellow = coverage.yellow,
            black = coverage.black,
            final_price = breakdown.final_price,
            "Estimate complete"
        );

        Ok::<_, AppError>(Estimate {
            id,
            file_name: upload.file_name,
            format: decoded.format,
            dimensions,
            coverage,
            channel_ink_costs,
            cost: breakdown,
            job,
            bytes,
        })
    }
    .instrument(span)
    .await
}

/// POST /estimate: HTML result page, or the error page when the upload fails.
pub async fn estimate_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match run_estimate(&state, multipart).await {
        Ok(estimate) => match render_result(&state, &estimate) {
            Ok(html) => Html(html).into_response(),
            Err(e) => e.into_response(),
        },
        Err(e) => render_error(&state, e),
    }
}

fn render_result(state: &AppState, estimate: &Estimate) -> Result<String, AppError> {
    let symbol = &state.config.currency_symbol;
    let job = &estimate.job;

    let mut ctx = tera::Context::new();
    ctx.insert("id", &estimate.id.to_string());
    ctx.insert("file_name", &estimate.file_name.as_deref().unwrap_or("upload"));
    ctx.insert("image_data_url", &estimate.image_data_url());
    ctx.insert("width_px", &estimate.dimensions.0);
    ctx.insert("height_px", &estimate.dimensions.1);
    ctx.insert("printer", job.printer.name);
    ctx.insert("ink_unit", job.printer.ink_unit);
    ctx.insert("width_mm", &format!("{:.1}", job.width_mm));
    ctx.insert("height_mm", &format!("{:.1}", job.height_mm));
    ctx.insert("markup_percent", &format::number(job.markup_fraction * 100.0));
    ctx.insert("coverage", &format::coverage_rows(&estimate.coverage));
    ctx.insert(
        "channel_costs",
        &format::channel_cost_rows(symbol, &estimate.channel_ink_costs),
    );
    ctx.insert("cost", &format::cost_rows(symbol, &estimate.cost));

    Ok(state.tera.render("result.html", &ctx)?)
}

fn render_error(state: &AppState, err: AppError) -> Response {
    let status = err.status();
    let mut ctx = tera::Context::new();
    ctx.insert("heading", err.heading());
    ctx.insert("message", &err.public_message());

    match state.tera.render("error.html", &ctx) {
        Ok(html) => {
            tracing::warn!(%status, error = %err, "Estimate failed");
            (status, Html(html)).into_response()
        }
        Err(render_err) => {
            tracing::error!(error = %render_err, "Failed to render error page");
            err.into_response()
        }
    }
}

/// POST /api/v1/estimate
pub async fn estimate_api(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EstimateResponse>, AppError> {
    let estimate = run_estimate(&state, multipart).await?;
    let symbol = &state.config.currency_symbol;

    Ok(Json(EstimateResponse {
        id: estimate.id.to_string(),
        printer: estimate.job.printer.name.to_string(),
        image: ImageSummary {
            format: format!("{:?}", estimate.format).to_lowercase(),
            width: estimate.dimensions.0,
            height: estimate.dimensions.1,
        },
        coverage: estimate.coverage,
        channel_ink_costs: estimate.channel_ink_costs.map(|_, c| round2(*c)),
        cost: estimate.cost.rounded(),
        display: EstimateDisplay {
            coverage: format::coverage_rows(&estimate.coverage),
            cost: format::cost_rows(symbol, &estimate.cost),
        },
    }))
}
