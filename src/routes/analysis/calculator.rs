use crate::imagery::{BandRaster, ImageryProvider, TimeWindow};
use geo_types::{Rect, coord};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The polygon has zero extent on one axis; the user must redraw.
    #[error("polygon collapses to a line or point")]
    DegenerateGeometry,
    /// The provider found no usable composite in the window.
    #[error("no cloud-free composite available in the requested window")]
    NoImageryAvailable,
    /// Every pixel is undefined (red + NIR = 0 everywhere); likely a
    /// provider or band-selection fault.
    #[error("every pixel in the composite is undefined")]
    EmptyRaster,
    /// Opaque transport or authentication failure, passed through unmodified.
    #[error(transparent)]
    Provider(#[from] anyhow::Error),
}

/// Per-pixel normalized index values, same dimensions as the source raster.
/// `None` marks undefined cells (red + NIR = 0), which are excluded from
/// both the colour mapping and the mean.
#[derive(Debug, Clone)]
pub struct IndexRaster {
    width: usize,
    height: usize,
    values: Vec<Option<f64>>,
}

impl IndexRaster {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value_at(&self, x: usize, y: usize) -> Option<f64> {
        self.values[y * self.width + x]
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().flatten().count()
    }

    /// Mean over defined cells, or `None` when every cell is undefined.
    pub fn mean(&self) -> Option<f64> {
        let (sum, count) = self
            .values
            .iter()
            .flatten()
            .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// Axis-aligned WGS84 bounding box of a closed ring.
///
/// Rejects rings with fewer than 3 vertices and rings that collapse to a
/// line or point (all longitudes equal or all latitudes equal).
pub fn bounding_box(coords: &[[f64; 2]]) -> Result<Rect<f64>, AnalysisError> {
    if coords.len() < 3 {
        return Err(AnalysisError::DegenerateGeometry);
    }

    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for [lon, lat] in coords {
        min_x = min_x.min(*lon);
        max_x = max_x.max(*lon);
        min_y = min_y.min(*lat);
        max_y = max_y.max(*lat);
    }

    if !(min_x < max_x) || !(min_y < max_y) {
        return Err(AnalysisError::DegenerateGeometry);
    }

    Ok(Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: max_y },
    ))
}

/// Per-pixel NDVI: `(nir - red) / (nir + red)` where the denominator is
/// non-zero. Side-effect-free and order-independent.
pub fn index_raster(raster: &BandRaster) -> IndexRaster {
    let values = (0..raster.len())
        .map(|i| {
            let (red, nir) = raster.bands_at(i);
            let sum = nir + red;
            (sum != 0.0).then(|| (nir - red) / sum)
        })
        .collect();

    IndexRaster {
        width: raster.width(),
        height: raster.height(),
        values,
    }
}

/// Scalar health score: mean of the defined index values, scaled to a
/// percentage. Uses unclamped values; display clamping never feeds in here.
pub fn health_score(index: &IndexRaster) -> Result<f64, AnalysisError> {
    index
        .mean()
        .map(|m| m * 100.0)
        .ok_or(AnalysisError::EmptyRaster)
}

/// Full analysis pass: bounding box, one provider call, per-pixel index,
/// score reduction. Fails fast; no retries and no partial result.
pub async fn compute(
    provider: &dyn ImageryProvider,
    coords: &[[f64; 2]],
    window: &TimeWindow,
) -> Result<(f64, IndexRaster), AnalysisError> {
    let bbox = bounding_box(coords)?;
    let raster = provider
        .fetch_composite(bbox, window)
        .await?
        .ok_or(AnalysisError::NoImageryAvailable)?;
    let index = index_raster(&raster);
    let score = health_score(&index)?;
    Ok((score, index))
}
