use super::AppState;
use crate::gemini;
use crate::logging::*;
use axum::{
    Router,
    extract::{Json, State},
    routing::post,
};
use nutriscan_common::ApiResponse;
use nutriscan_common::analysis::{AnalyzeReport, AnalyzeRequest};
use nutriscan_common::{config, prompt};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

static RETRY_ATTEMPTS: Lazy<u32> = Lazy::new(|| {
    config::get("ANALYZE_RETRY_ATTEMPTS")
        .and_then(|v| Ok(v.parse()?))
        .unwrap_or(3) // デフォルト: 3回
});

static RETRY_BASE_DELAY: Lazy<Duration> = Lazy::new(|| {
    config::get("ANALYZE_RETRY_BASE_DELAY")
        .and_then(|v| Ok(humantime::parse_duration(&v)?))
        .unwrap_or_else(|_| Duration::from_secs(2)) // デフォルト: 2秒
});

pub fn add_route(app: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    app.route("/analyze", post(analyze))
}

async fn analyze(
    State(_): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<ApiResponse<AnalyzeReport, String>> {
    let log = DEFAULT.new(o!("function" => "analyze"));
    info!(log, "start");

    let client = match gemini::Client::new_default() {
        Ok(client) => client,
        Err(err) => {
            info!(log, "Failed to create client"; "error" => ?err);
            return Json(ApiResponse::Error(err.to_string()));
        }
    };

    match run_analysis(&client, request, *RETRY_ATTEMPTS, *RETRY_BASE_DELAY).await {
        Ok(report) => {
            info!(log, "done"; "text_len" => report.text.len());
            Json(ApiResponse::Success(report))
        }
        Err(err) => {
            info!(log, "Failed to analyze"; "error" => ?err);
            Json(ApiResponse::Error(err.to_string()))
        }
    }
}

async fn run_analysis(
    client: &gemini::Client,
    request: AnalyzeRequest,
    max_attempts: u32,
    base_delay: Duration,
) -> crate::Result<AnalyzeReport> {
    if request.image.is_empty() {
        // 画像なしではモデル呼び出しを行わない
        anyhow::bail!(gemini::Error::MissingImage);
    }

    let prompt = prompt::build(&request.context);
    let text = gemini::with_retry(max_attempts, base_delay, |_| {
        client.generate(prompt.clone(), request.image.clone(), request.format)
    })
    .await?;

    Ok(AnalyzeReport {
        model: client.model_name(),
        text,
    })
}
