//! Image generation service.
//!
//! Packages a prompt plus generation options into the provider's wire shape
//! and dispatches it through the shared pipeline. Returns the first generated
//! image URL.

use crate::ai::AiEndpoint;
use crate::dispatcher::Dispatcher;
use crate::{NetError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Provider endpoint and model selection for the image service.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

/// Generation options with the provider's defaults.
#[derive(Debug, Clone)]
pub struct ImageOptions {
    pub size: String,
    pub seed: Option<i64>,
    pub guidance_scale: f64,
    pub watermark: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            size: "720x1280".to_string(),
            seed: None,
            guidance_scale: 2.5,
            watermark: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest {
    model: String,
    prompt: String,
    response_format: &'static str,
    size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    guidance_scale: f64,
    watermark: bool,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
    usage: Option<ImageUsage>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImageUsage {
    generated_images: u32,
    output_tokens: Option<u64>,
    total_tokens: Option<u64>,
}

/// Image generation over the shared dispatch pipeline.
pub struct ImageService {
    dispatcher: Arc<Dispatcher>,
    config: ImageConfig,
}

impl ImageService {
    pub fn new(dispatcher: Arc<Dispatcher>, config: ImageConfig) -> Self {
        Self { dispatcher, config }
    }

    /// Generate one image for `prompt` and return its URL.
    pub async fn generate_image(&self, prompt: &str, options: ImageOptions) -> Result<String> {
        let request = ImageRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            response_format: "url",
            size: options.size,
            seed: options.seed,
            guidance_scale: options.guidance_scale,
            watermark: options.watermark,
        };
        let body = serde_json::to_vec(&request).map_err(NetError::Encoding)?;

        let endpoint = AiEndpoint {
            url: format!("{}/images/generations", self.config.base_url),
            api_key: self.config.api_key.clone(),
            body,
        };
        let payload = self.dispatcher.dispatch(&endpoint).await?;
        let response: ImageResponse =
            serde_json::from_value(payload).map_err(NetError::Decoding)?;

        if let Some(usage) = &response.usage {
            debug!(
                generated = usage.generated_images,
                output_tokens = usage.output_tokens,
                total_tokens = usage.total_tokens,
                "image generation usage"
            );
        }

        response
            .data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or(NetError::NoData)
    }
}
