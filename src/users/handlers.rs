use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::password::hash_password,
    db::parse_id,
    error::ApiError,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, PublicUser, UpdateUserRequest, UserCreatedResponse,
            UserListResponse, UserUpdatedResponse,
        },
        repo_types::{NewUser, UserPatch},
    },
    validation::Checks,
};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api", get(list_users).post(create_user))
        .route("/api/:id", put(update_user).delete(delete_user))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.users.list().await?;
    Ok(Json(UserListResponse {
        ok: true,
        msg: "get API",
        usuarios: users.iter().map(PublicUser::from).collect(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserCreatedResponse>), ApiError> {
    let mut checks = Checks::new();
    checks
        .email("correo", payload.correo.as_deref(), "El correo no es válido")
        .not_empty("nombre", payload.nombre.as_deref(), "El nombre es obligatorio")
        .min_len(
            "password",
            payload.password.as_deref(),
            MIN_PASSWORD_LEN,
            "El password debe tener al menos 6 caracteres",
        );

    let role = payload.rol.clone().unwrap_or_default();
    let role_exists = state.roles.exists(&role).await?;
    checks.check(
        "rol",
        &payload.rol,
        role_exists,
        format!("El rol {role} no está en la BD"),
    );

    if let Some(email) = payload.correo.as_deref() {
        let taken = state.users.find_by_email(email).await?.is_some();
        checks.check(
            "correo",
            email,
            !taken,
            format!("El correo {email} YA está en la BD"),
        );
    }

    if let Err(e) = checks.finish() {
        warn!(email = ?payload.correo, "user rejected by validation");
        return Err(e);
    }

    let hash = hash_password(&payload.password.unwrap_or_default())?;
    let user = state
        .users
        .create(NewUser {
            name: payload.nombre.unwrap_or_default(),
            email: payload.correo.unwrap_or_default(),
            password: hash,
            image: payload.img,
            role,
            google: false,
        })
        .await?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            ok: true,
            msg: "post API",
            usuario: PublicUser::from(&user),
        }),
    ))
}

/// Applies the supplied fields. Whatever password arrives (empty when
/// absent) is hashed and replaces the stored one.
#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserUpdatedResponse>, ApiError> {
    let oid = parse_id(&id)?;
    let patch = UserPatch {
        name: payload.nombre,
        email: payload.correo,
        image: payload.img,
        role: payload.rol,
        google: payload.google,
        password: hash_password(&payload.password.unwrap_or_default())?,
    };

    let user = state
        .users
        .update(oid, patch)
        .await?
        .ok_or_else(|| ApiError::not_found("Usuario no encontrado"))?;

    info!(user_id = %user.id, "user updated");
    Ok(Json(UserUpdatedResponse {
        ok: true,
        msg: "put API",
        id,
        usuario: PublicUser::from(&user),
    }))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let oid = parse_id(&id)?;
    let deleted = state.users.delete(oid).await?;
    info!(user_id = %oid, deleted, "user delete");
    Ok(Json(json!({ "ok": true, "msg": "delete API" })))
}
