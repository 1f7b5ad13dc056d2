use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    db::parse_id,
    error::ApiError,
    plants::{
        dto::{PlantCreatedResponse, PlantRequest, PlantUpdatedResponse, PublicPlant},
        repo_types::NewPlant,
    },
    state::AppState,
    validation::Checks,
};

pub fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/webresources/generic/plantas", get(list_plants))
        .route("/webresources/generic/planta", post(create_plant))
        .route(
            "/webresources/generic/planta/:id",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
}

fn plant_not_found() -> ApiError {
    ApiError::not_found("Planta no encontrada")
}

#[instrument(skip(state))]
pub async fn get_plant(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PublicPlant>, ApiError> {
    let oid = parse_id(&id)?;
    let plant = state.plants.find(oid).await?.ok_or_else(plant_not_found)?;
    Ok(Json(PublicPlant::from(&plant)))
}

#[instrument(skip(state))]
pub async fn list_plants(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
) -> Result<Json<Vec<PublicPlant>>, ApiError> {
    let plants = state.plants.list().await?;
    Ok(Json(plants.iter().map(PublicPlant::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_plant(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(payload): Json<PlantRequest>,
) -> Result<(StatusCode, Json<PlantCreatedResponse>), ApiError> {
    let mut checks = Checks::new();
    checks
        .not_empty("nombre", payload.nombre.as_deref(), "El nombre es obligatorio")
        .not_empty("categoria", payload.categoria.as_deref(), "La categoria es obligatoria");
    checks.finish()?;

    let plant = state
        .plants
        .create(NewPlant {
            name: payload.nombre.unwrap_or_default(),
            image: payload.imagen,
            category: payload.categoria.unwrap_or_default(),
            price: payload.precio,
        })
        .await?;

    info!(plant_id = %plant.id, %caller, "plant created");
    Ok((
        StatusCode::CREATED,
        Json(PlantCreatedResponse {
            ok: true,
            msg: "post API plantas",
            planta: PublicPlant::from(&plant),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_plant(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<PlantRequest>,
) -> Result<Json<PlantUpdatedResponse>, ApiError> {
    let oid = parse_id(&id)?;
    let plant = state
        .plants
        .update(oid, payload.into())
        .await?
        .ok_or_else(plant_not_found)?;

    info!(plant_id = %plant.id, %caller, "plant updated");
    Ok(Json(PlantUpdatedResponse {
        ok: true,
        msg: "put API planta",
        body: PublicPlant::from(&plant),
    }))
}

#[instrument(skip(state))]
pub async fn delete_plant(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let oid = parse_id(&id)?;
    if !state.plants.delete(oid).await? {
        return Err(plant_not_found());
    }
    info!(plant_id = %oid, %caller, "plant deleted");
    Ok(Json(json!({ "ok": true, "msg": "delete API" })))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::{
        plants::repo_types::NewPlant,
        state::AppState,
        test_support::{call, json_request, token_for},
    };

    async fn seed_plant(state: &AppState) -> String {
        state
            .plants
            .create(NewPlant {
                name: "Ficus".into(),
                image: Some("ficus.jpg".into()),
                category: "interior".into(),
                price: Some(12.5),
            })
            .await
            .unwrap()
            .id
            .to_hex()
    }

    #[tokio::test]
    async fn plant_routes_require_a_token() {
        let state = AppState::fake();
        let (status, body) = call(
            &state,
            json_request(Method::GET, "/webresources/generic/plantas", &json!(null), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["msg"].is_string());

        let (status, _) = call(
            &state,
            json_request(
                Method::GET,
                "/webresources/generic/plantas",
                &json!(null),
                Some("not.a.jwt"),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_then_read_exposes_public_id() {
        let state = AppState::fake();
        let token = token_for(&state);

        let (status, body) = call(
            &state,
            json_request(
                Method::POST,
                "/webresources/generic/planta",
                &json!({ "nombre": "Ficus", "categoria": "interior", "precio": 12.5 }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["planta"]["id"].as_str().unwrap().to_string();

        let (status, body) = call(
            &state,
            json_request(
                Method::GET,
                &format!("/webresources/generic/planta/{id}"),
                &json!(null),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);
        assert_eq!(body["nombre"], "Ficus");
        assert!(body.get("_id").is_none());
    }

    #[tokio::test]
    async fn create_requires_name_and_category() {
        let state = AppState::fake();
        let token = token_for(&state);
        let (status, body) = call(
            &state,
            json_request(
                Method::POST,
                "/webresources/generic/planta",
                &json!({ "precio": 3.0 }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"].as_array().unwrap().len(), 2);
        assert!(state.plants.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_sets_only_supplied_fields() {
        let state = AppState::fake();
        let token = token_for(&state);
        let id = seed_plant(&state).await;

        let (status, body) = call(
            &state,
            json_request(
                Method::PUT,
                &format!("/webresources/generic/planta/{id}"),
                &json!({ "precio": 9.99 }),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["body"]["precio"], 9.99);
        assert_eq!(body["body"]["nombre"], "Ficus");
        assert_eq!(body["body"]["imagen"], "ficus.jpg");
    }

    #[tokio::test]
    async fn delete_then_read_is_not_found() {
        let state = AppState::fake();
        let token = token_for(&state);
        let id = seed_plant(&state).await;
        let uri = format!("/webresources/generic/planta/{id}");

        let (status, body) =
            call(&state, json_request(Method::DELETE, &uri, &json!(null), Some(&token))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);

        let (status, _) =
            call(&state, json_request(Method::GET, &uri, &json!(null), Some(&token))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let state = AppState::fake();
        let token = token_for(&state);
        let (status, body) = call(
            &state,
            json_request(
                Method::GET,
                "/webresources/generic/planta/30",
                &json!(null),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["msg"], "id no válido");
    }

    #[tokio::test]
    async fn list_returns_every_plant() {
        let state = AppState::fake();
        let token = token_for(&state);
        seed_plant(&state).await;
        seed_plant(&state).await;

        let (status, body) = call(
            &state,
            json_request(
                Method::GET,
                "/webresources/generic/plantas",
                &json!(null),
                Some(&token),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
