// Mock imagery providers driving the analysis endpoints in tests

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use fieldscope_api::imagery::{BandRaster, ImageryProvider, TimeWindow};
use geo_types::Rect;

/// Always returns the same raster, whatever the bbox or window.
pub struct StaticProvider {
    raster: BandRaster,
}

impl StaticProvider {
    pub fn new(raster: BandRaster) -> Self {
        Self { raster }
    }

    /// Synthetic 2x2 raster: red=[10,10,0,5], nir=[30,10,0,15].
    /// Three defined pixels with indices 0.5, 0.0 and 0.5, one undefined.
    pub fn synthetic_2x2() -> Self {
        let raster = BandRaster::new(
            2,
            2,
            vec![10.0, 10.0, 0.0, 5.0],
            vec![30.0, 10.0, 0.0, 15.0],
        )
        .unwrap();
        Self::new(raster)
    }

    /// Every pixel has red + NIR = 0.
    pub fn all_undefined(width: usize, height: usize) -> Self {
        let n = width * height;
        Self::new(BandRaster::new(width, height, vec![0.0; n], vec![0.0; n]).unwrap())
    }
}

#[async_trait]
impl ImageryProvider for StaticProvider {
    async fn fetch_composite(
        &self,
        _bbox: Rect<f64>,
        _window: &TimeWindow,
    ) -> Result<Option<BandRaster>> {
        Ok(Some(self.raster.clone()))
    }
}

/// No cloud-free composite in the window.
pub struct NoDataProvider;

#[async_trait]
impl ImageryProvider for NoDataProvider {
    async fn fetch_composite(
        &self,
        _bbox: Rect<f64>,
        _window: &TimeWindow,
    ) -> Result<Option<BandRaster>> {
        Ok(None)
    }
}

/// Opaque transport failure.
pub struct FailingProvider;

#[async_trait]
impl ImageryProvider for FailingProvider {
    async fn fetch_composite(
        &self,
        _bbox: Rect<f64>,
        _window: &TimeWindow,
    ) -> Result<Option<BandRaster>> {
        Err(anyhow!("connection reset by peer"))
    }
}

/// Panics when called; used to prove geometry errors fire before any
/// provider call.
pub struct PanicProvider;

#[async_trait]
impl ImageryProvider for PanicProvider {
    async fn fetch_composite(
        &self,
        _bbox: Rect<f64>,
        _window: &TimeWindow,
    ) -> Result<Option<BandRaster>> {
        panic!("provider must not be called for degenerate geometry");
    }
}
