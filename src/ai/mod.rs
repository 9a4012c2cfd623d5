//! AI chat completion and image generation services.
//!
//! Both services package a typed request body and push it through the shared
//! dispatch pipeline via a bearer-authorized descriptor; they contain no HTTP
//! plumbing of their own.

pub mod chat;
pub mod image;

pub use chat::{ChatConfig, ChatService, ChatTurn};
pub use image::{ImageConfig, ImageOptions, ImageService};

use crate::endpoint::Endpoint;
use std::collections::HashMap;

/// Descriptor for one bearer-authorized POST with a pre-serialized JSON body.
pub(crate) struct AiEndpoint {
    pub url: String,
    pub api_key: String,
    pub body: Vec<u8>,
}

impl Endpoint for AiEndpoint {
    fn url(&self) -> String {
        self.url.clone()
    }

    fn headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            (
                "Authorization".to_string(),
                format!("Bearer {}", self.api_key),
            ),
        ])
    }

    fn body(&self) -> Option<Vec<u8>> {
        Some(self.body.clone())
    }
}
