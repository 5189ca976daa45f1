pub mod sentinel;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use geo_types::Rect;

/// A two-band (red, near-infrared) raster in row-major order.
///
/// Band intensities share units and are non-negative; the provider is
/// responsible for cloud masking and compositing before we ever see them.
#[derive(Debug, Clone)]
pub struct BandRaster {
    width: usize,
    height: usize,
    red: Vec<f64>,
    nir: Vec<f64>,
}

impl BandRaster {
    pub fn new(width: usize, height: usize, red: Vec<f64>, nir: Vec<f64>) -> Result<Self> {
        let expected = width * height;
        if red.len() != expected || nir.len() != expected {
            return Err(anyhow!(
                "band length mismatch: expected {expected} pixels, got red={} nir={}",
                red.len(),
                nir.len()
            ));
        }
        if red.iter().chain(nir.iter()).any(|v| *v < 0.0) {
            return Err(anyhow!("band intensities must be non-negative"));
        }
        Ok(Self {
            width,
            height,
            red,
            nir,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (red, nir) intensities at a row-major pixel offset.
    pub fn bands_at(&self, idx: usize) -> (f64, f64) {
        (self.red[idx], self.nir[idx])
    }

    pub fn len(&self) -> usize {
        self.red.len()
    }

    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }
}

/// Inclusive date range used to request the most recent cloud-free
/// composite within that span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl TimeWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(anyhow!("time window ends ({end}) before it starts ({start})"));
        }
        Ok(Self { start, end })
    }

    /// Window covering the last `days` days up to today.
    pub fn ending_today(days: i64) -> Self {
        let end = chrono::Utc::now().date_naive();
        Self {
            start: end - chrono::Duration::days(days),
            end,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// External imagery source.
///
/// `Ok(None)` means the provider found no usable composite in the window;
/// any transport or authentication failure passes through as an opaque
/// error. Compositing and cloud masking are the provider's business.
#[async_trait]
pub trait ImageryProvider: Send + Sync {
    async fn fetch_composite(
        &self,
        bbox: Rect<f64>,
        window: &TimeWindow,
    ) -> Result<Option<BandRaster>>;
}
