use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Scores strictly above this are EXCELLENT.
pub const EXCELLENT_THRESHOLD: f64 = 60.0;
/// Scores strictly above this (and at most EXCELLENT_THRESHOLD) are MODERATE.
pub const MODERATE_THRESHOLD: f64 = 35.0;

/// Three-band crop status. Thresholds are fixed policy constants.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CropStatus {
    Excellent,
    Moderate,
    Poor,
}

impl CropStatus {
    pub fn from_score(score: f64) -> Self {
        if score > EXCELLENT_THRESHOLD {
            CropStatus::Excellent
        } else if score > MODERATE_THRESHOLD {
            CropStatus::Moderate
        } else {
            CropStatus::Poor
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            CropStatus::Excellent => "Vegetation is vigorous.",
            CropStatus::Moderate => "Check irrigation and fertilisation.",
            CropStatus::Poor => "Possible disease or drought stress.",
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Closed ring of [lon, lat] pairs (WGS84).
    pub coords: Vec<[f64; 2]>,
    /// Defaults to `end_date` minus the configured window length.
    pub start_date: Option<NaiveDate>,
    /// Defaults to today.
    pub end_date: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    /// Mean NDVI over defined pixels, as a percentage.
    pub score: f64,
    pub status: CropStatus,
    pub advice: String,
    pub defined_pixels: usize,
    pub total_pixels: usize,
    pub width: usize,
    pub height: usize,
}
