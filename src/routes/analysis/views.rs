use super::calculator::{self, AnalysisError};
use super::models::{AnalysisRequest, AnalysisResponse, CropStatus};
use super::styling;
use crate::common::state::AppState;
use crate::config::Config;
use crate::imagery::TimeWindow;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::error;
use utoipa_axum::{router::OpenApiRouter, routes};

pub fn router(state: &AppState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(analyze))
        .routes(routes!(analyze_image))
        .with_state(state.clone())
}

/// Each analysis attempt is terminal: the error kind decides the status and
/// nothing partial is returned.
fn error_status(e: &AnalysisError) -> StatusCode {
    match e {
        AnalysisError::DegenerateGeometry => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::NoImageryAvailable => StatusCode::NOT_FOUND,
        AnalysisError::EmptyRaster | AnalysisError::Provider(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Resolves the request dates into a time window, defaulting to the last
/// `default_window_days` days ending today.
fn resolve_window(request: &AnalysisRequest, config: &Config) -> Result<TimeWindow, StatusCode> {
    let today = chrono::Utc::now().date_naive();
    let window = match (request.start_date, request.end_date) {
        (None, None) => return Ok(TimeWindow::ending_today(config.default_window_days)),
        (Some(start), Some(end)) => TimeWindow::new(start, end),
        (Some(start), None) => TimeWindow::new(start, today),
        (None, Some(end)) => {
            TimeWindow::new(end - chrono::Duration::days(config.default_window_days), end)
        }
    };
    window.map_err(|_| StatusCode::UNPROCESSABLE_ENTITY)
}

#[utoipa::path(
    post,
    path = "/api/analysis",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Vegetation health snapshot", body = AnalysisResponse),
        (status = 404, description = "No cloud-free composite in the window"),
        (status = 422, description = "Degenerate polygon or invalid time window"),
        (status = 502, description = "Imagery provider failure or fully undefined raster")
    ),
    summary = "Analyse a field boundary",
    description = "Computes the NDVI health score and classification for a polygon over a time window."
)]
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, StatusCode> {
    let window = resolve_window(&request, &state.config)?;

    let (score, index) = calculator::compute(state.provider.as_ref(), &request.coords, &window)
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis failed");
            error_status(&e)
        })?;

    let status = CropStatus::from_score(score);
    Ok(Json(AnalysisResponse {
        score,
        status,
        advice: status.advice().to_string(),
        defined_pixels: index.defined_count(),
        total_pixels: index.len(),
        width: index.width(),
        height: index.height(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/analysis/image",
    request_body = AnalysisRequest,
    responses(
        (status = 200, description = "Colour-mapped index raster", body = [u8], content_type = "image/png"),
        (status = 404, description = "No cloud-free composite in the window"),
        (status = 422, description = "Degenerate polygon or invalid time window"),
        (status = 502, description = "Imagery provider failure or fully undefined raster")
    ),
    summary = "Render an analysis raster",
    description = "Runs the same analysis and returns the colour-mapped NDVI raster as a PNG."
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let window = resolve_window(&request, &state.config)?;

    let (_, index) = calculator::compute(state.provider.as_ref(), &request.coords, &window)
        .await
        .map_err(|e| {
            error!(error = %e, "Analysis image failed");
            error_status(&e)
        })?;

    let png_data = styling::render_index_png(&index).map_err(|e| {
        error!(error = %e, "Error rendering index raster");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(start: Option<NaiveDate>, end: Option<NaiveDate>) -> AnalysisRequest {
        AnalysisRequest {
            coords: vec![[22.54, 40.64], [22.55, 40.64], [22.55, 40.65]],
            start_date: start,
            end_date: end,
        }
    }

    #[test]
    fn test_resolve_window_defaults_to_configured_span() {
        let config = Config::for_tests();
        let window = resolve_window(&request(None, None), &config).unwrap();
        assert_eq!(
            (window.end() - window.start()).num_days(),
            config.default_window_days
        );
    }

    #[test]
    fn test_resolve_window_rejects_inverted_dates() {
        let config = Config::for_tests();
        let start = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(
            resolve_window(&request(Some(start), Some(end)), &config).unwrap_err(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_resolve_window_fills_missing_end() {
        let config = Config::for_tests();
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let window = resolve_window(&request(Some(start), None), &config).unwrap();
        assert_eq!(window.start(), start);
        assert_eq!(window.end(), chrono::Utc::now().date_naive());
    }
}
