//! Authentication endpoint descriptors and their response models.
//!
//! Plain data shapes plugged into the dispatcher: each descriptor supplies
//! the URL, headers, and parameters or body for one auth operation and
//! nothing else. Base URLs are injected by the caller rather than baked in.

use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

/// Response envelope shared by the login and register operations.
///
/// On login, `data` carries the bearer credential.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub code: i64,
    pub data: Option<String>,
    pub msg: Option<String>,
}

/// User entity sent as the registration body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

fn json_headers() -> HashMap<String, String> {
    HashMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

/// POST `/community/user/login` with username and password parameters.
pub struct LoginEndpoint {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl Endpoint for LoginEndpoint {
    fn url(&self) -> String {
        format!("{}/community/user/login", self.base_url)
    }

    fn headers(&self) -> HashMap<String, String> {
        json_headers()
    }

    fn parameters(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("username".into(), json!(self.username));
        params.insert("password".into(), json!(self.password));
        params
    }
}

/// POST `/community/user/register` with a pre-serialized [`UserProfile`] body.
///
/// The parameters stay empty on purpose: the body takes precedence in the
/// dispatcher, and this descriptor relies on that.
pub struct RegisterEndpoint {
    pub base_url: String,
    pub profile: UserProfile,
}

impl RegisterEndpoint {
    pub fn new(base_url: impl Into<String>, username: &str, password: &str, nickname: &str) -> Self {
        Self {
            base_url: base_url.into(),
            profile: UserProfile {
                username: Some(username.to_string()),
                password: Some(password.to_string()),
                nickname: Some(nickname.to_string()),
                ..UserProfile::default()
            },
        }
    }
}

impl Endpoint for RegisterEndpoint {
    fn url(&self) -> String {
        format!("{}/community/user/register", self.base_url)
    }

    fn headers(&self) -> HashMap<String, String> {
        json_headers()
    }

    fn body(&self) -> Option<Vec<u8>> {
        serde_json::to_vec(&self.profile).ok()
    }
}
