use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{GoogleRequest, GoogleResponse, LoginRequest, LoginResponse},
        jwt::JwtKeys,
        password::verify_password,
        services::find_or_create_google_user,
    },
    state::AppState,
    users::dto::PublicUser,
    validation::Checks,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/google", post(google_sign_in))
}

fn reject(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn auth_failure() -> Response {
    reject(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "msg": "Error de autenticación" }),
    )
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, Response> {
    let mut checks = Checks::new();
    checks
        .email("correo", payload.correo.as_deref(), "El correo no es válido")
        .not_empty("password", payload.password.as_deref(), "La contraseña no puede ser vacía");
    checks.finish().map_err(IntoResponse::into_response)?;

    let email = payload.correo.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = match state.users.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(reject(
                StatusCode::BAD_REQUEST,
                json!({ "msg": "El correo no existe", "correo": email }),
            ));
        }
        Err(e) => {
            error!(error = ?e, "find_by_email failed");
            return Err(auth_failure());
        }
    };

    let ok = match verify_password(&password, &user.password) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, user_id = %user.id, "stored password is not a hash");
            false
        }
    };
    if !ok {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(reject(
            StatusCode::BAD_REQUEST,
            json!({ "msg": "El password no es correcto" }),
        ));
    }

    let id = user.id.to_hex();
    let token = JwtKeys::from_ref(&state).sign(&id).map_err(|e| {
        error!(error = %e, "jwt sign failed");
        auth_failure()
    })?;

    info!(user_id = %id, email = %user.email, "user logged in");
    Ok(Json(LoginResponse {
        msg: "Login OK",
        token,
        id,
    }))
}

/// Every failure after input validation yields the same response, whatever
/// the cause.
#[instrument(skip(state, payload))]
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(payload): Json<GoogleRequest>,
) -> Result<Json<GoogleResponse>, Response> {
    let mut checks = Checks::new();
    checks.not_empty("id_token", payload.id_token.as_deref(), "El token es necesario");
    checks.finish().map_err(IntoResponse::into_response)?;
    let id_token = payload.id_token.unwrap_or_default();

    let outcome = async {
        let identity = state.google.verify(&id_token).await?;
        let user = find_or_create_google_user(&state, identity).await?;
        let token = JwtKeys::from_ref(&state).sign(&user.id.to_hex())?;
        anyhow::Ok((user, token))
    }
    .await;

    match outcome {
        Ok((user, token)) => {
            info!(user_id = %user.id, email = %user.email, "user signed in with google");
            Ok(Json(GoogleResponse {
                msg: "Todo bien con Google",
                id_token,
                token,
                usuario: PublicUser::from(&user),
            }))
        }
        Err(e) => {
            warn!(error = %e, "google sign-in failed");
            Err(reject(
                StatusCode::BAD_REQUEST,
                json!({ "msg": "ERROR DE VERIFICACIÓN DE GMAIL", "id_token": id_token }),
            ))
        }
    }
}
