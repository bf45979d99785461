use serde::{Deserialize, Serialize};

/// Successful login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub username: String,
    pub role: String,
}

impl LoginData {
    pub fn new(token: String, username: String, role: String) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            username,
            role,
        }
    }
}
