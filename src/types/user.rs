use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    #[serde(default)]
    pub definers: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload handed to the account directory; the password already
/// hashed, the email already lowercased by the caller or the directory.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub definers: Option<serde_json::Value>,
}
