use serde::{Deserialize, Serialize};

/// Login body. Fields are optional so that a missing field is a 400 from our own validation rather than a
/// deserializer error with an opaque body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    pub status: Option<String>,
}

/// The streaming endpoint authenticates via query parameter because `EventSource` cannot carry headers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamQuery {
    #[serde(default)]
    pub token: Option<String>,
}
