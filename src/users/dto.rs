use serde::{Deserialize, Serialize};

use super::repo_types::User;

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub nombre: String,
    pub correo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub rol: String,
    pub google: bool,
}

impl From<&User> for PublicUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_hex(),
            nombre: u.name.clone(),
            correo: u.email.clone(),
            img: u.image.clone(),
            rol: u.role.clone(),
            google: u.google,
        }
    }
}

/// Request body for `POST /api`. Fields are optional so that missing
/// ones surface as validation errors instead of a decode failure.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub img: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub nombre: Option<String>,
    pub correo: Option<String>,
    pub password: Option<String>,
    pub rol: Option<String>,
    pub img: Option<String>,
    pub google: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub usuarios: Vec<PublicUser>,
}

#[derive(Debug, Serialize)]
pub struct UserCreatedResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub usuario: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct UserUpdatedResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub id: String,
    pub usuario: PublicUser,
}
