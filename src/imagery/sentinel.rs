use super::{BandRaster, ImageryProvider, TimeWindow};
use crate::config::Config;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use geo_types::Rect;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info};

/// Evalscript handed to the Process API: red (B04) goes into the R channel,
/// NIR (B08) into G. The blue channel is unused padding so the response is a
/// plain RGB PNG we can decode with the `image` crate.
const EVALSCRIPT: &str = r#"//VERSION=3
function setup() {
    return {
        input: [{ bands: ["B04", "B08"] }],
        output: { bands: 3, sampleType: "UINT8" }
    };
}
function evaluatePixel(sample) {
    return [255 * sample.B04, 255 * sample.B08, 0];
}
"#;

/// Sentinel-2 ground resolution for the requested bands.
const TARGET_RESOLUTION_M: f64 = 10.0;
const MIN_DIMENSION: u32 = 32;
/// Process API ceiling per axis.
const MAX_DIMENSION: u32 = 2048;
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Sentinel Hub Process API client.
///
/// One token fetch and one process call per analysis; no token caching and
/// no retries. Cloud masking and compositing happen provider-side via the
/// least-cloud-coverage mosaicking order.
pub struct SentinelHubProvider {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    base_url: String,
    collection: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl SentinelHubProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.sh_client_id.clone(),
            client_secret: config.sh_client_secret.clone(),
            base_url: config.sh_base_url.trim_end_matches('/').to_string(),
            collection: config.sh_collection.clone(),
        }
    }

    async fn fetch_token(&self) -> Result<String> {
        let url = format!(
            "{}/auth/realms/main/protocol/openid-connect/token",
            self.base_url
        );
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .context("token request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "imagery provider rejected credentials: {}",
                response.status()
            ));
        }

        let token: TokenResponse = response
            .json()
            .await
            .context("malformed token response")?;
        Ok(token.access_token)
    }

    fn process_body(&self, bbox: Rect<f64>, window: &TimeWindow, width: u32, height: u32) -> Value {
        json!({
            "input": {
                "bounds": {
                    "bbox": [bbox.min().x, bbox.min().y, bbox.max().x, bbox.max().y],
                    "properties": { "crs": "http://www.opengis.net/def/crs/EPSG/0/4326" }
                },
                "data": [{
                    "type": self.collection,
                    "dataFilter": {
                        "timeRange": {
                            "from": format!("{}T00:00:00Z", window.start()),
                            "to": format!("{}T23:59:59Z", window.end())
                        },
                        "mosaickingOrder": "leastCC"
                    }
                }]
            },
            "output": {
                "width": width,
                "height": height,
                "responses": [{
                    "identifier": "default",
                    "format": { "type": "image/png" }
                }]
            },
            "evalscript": EVALSCRIPT
        })
    }
}

/// Derives the requested raster size from the bbox extent at the target
/// resolution, shrinking longitude spans by the cosine of the centre
/// latitude. Clamped to the Process API limits.
pub fn output_dimensions(bbox: Rect<f64>) -> (u32, u32) {
    let centre_lat = (bbox.min().y + bbox.max().y) / 2.0;
    let width_m = bbox.width() * METERS_PER_DEGREE * centre_lat.to_radians().cos().abs();
    let height_m = bbox.height() * METERS_PER_DEGREE;

    let clamp = |metres: f64| -> u32 {
        ((metres / TARGET_RESOLUTION_M).round() as u32).clamp(MIN_DIMENSION, MAX_DIMENSION)
    };
    (clamp(width_m), clamp(height_m))
}

#[async_trait]
impl ImageryProvider for SentinelHubProvider {
    async fn fetch_composite(
        &self,
        bbox: Rect<f64>,
        window: &TimeWindow,
    ) -> Result<Option<BandRaster>> {
        let token = self.fetch_token().await?;
        let (width, height) = output_dimensions(bbox);
        debug!(
            width,
            height,
            from = %window.start(),
            to = %window.end(),
            "Requesting composite"
        );

        let response = self
            .http
            .post(format!("{}/api/v1/process", self.base_url))
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "image/png")
            .json(&self.process_body(bbox, window, width, height))
            .send()
            .await
            .context("process request failed")?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == reqwest::StatusCode::BAD_REQUEST
                && body.to_lowercase().contains("no data available")
            {
                return Ok(None);
            }
            return Err(anyhow!("imagery provider returned {status}: {body}"));
        }

        let bytes = response
            .bytes()
            .await
            .context("failed to read composite body")?;
        let img = image::load_from_memory(&bytes)
            .context("provider returned an undecodable composite")?
            .to_rgb8();

        let mut red = Vec::with_capacity((img.width() * img.height()) as usize);
        let mut nir = Vec::with_capacity(red.capacity());
        for px in img.pixels() {
            red.push(f64::from(px.0[0]));
            nir.push(f64::from(px.0[1]));
        }

        let raster = BandRaster::new(img.width() as usize, img.height() as usize, red, nir)?;
        info!(
            width = raster.width(),
            height = raster.height(),
            "Composite received"
        );
        Ok(Some(raster))
    }
}
