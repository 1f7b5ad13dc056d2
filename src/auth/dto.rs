use serde::{Deserialize, Serialize};

use crate::users::dto::PublicUser;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub correo: Option<String>,
    pub password: Option<String>,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: &'static str,
    pub token: String,
    pub id: String,
}

/// Request body for Google sign-in.
#[derive(Debug, Deserialize)]
pub struct GoogleRequest {
    pub id_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoogleResponse {
    pub msg: &'static str,
    pub id_token: String,
    pub token: String,
    pub usuario: PublicUser,
}
