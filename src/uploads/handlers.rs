use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::services::{is_allowed_extension, upload_plant_image, UploadItem, ALLOWED_EXTENSIONS};
use crate::{
    error::ApiError,
    plants::{dto::PublicPlant, repo_types::NewPlant},
    state::AppState,
    validation::Checks,
};

pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/subir2", post(upload_plant))
        .layer(DefaultBodyLimit::disable())
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub msg: &'static str,
    #[serde(rename = "uploadPath")]
    pub upload_path: String,
    pub planta: PublicPlant,
}

#[derive(Default)]
struct UploadForm {
    saw_file: bool,
    archivo: Option<UploadItem>,
    nombre: Option<String>,
    categoria: Option<String>,
    precio: Option<String>,
}

async fn read_form(mp: &mut Multipart) -> Result<UploadForm, ApiError> {
    let bad_form = |e: axum::extract::multipart::MultipartError| {
        ApiError::bad_request(format!("formulario no válido: {e}"))
    };

    let mut form = UploadForm::default();
    while let Some(field) = mp.next_field().await.map_err(bad_form)? {
        let name = field.name().unwrap_or_default().to_string();
        if let Some(file_name) = field.file_name().map(str::to_string) {
            form.saw_file = true;
            let body = field.bytes().await.map_err(bad_form)?;
            if name == "archivo" {
                form.archivo = Some(UploadItem { file_name, body });
            }
            continue;
        }
        let value = field.text().await.map_err(bad_form)?;
        match name.as_str() {
            "nombre" => form.nombre = Some(value),
            "categoria" => form.categoria = Some(value),
            "precio" => form.precio = Some(value),
            _ => {}
        }
    }
    Ok(form)
}

/// `POST /subir2`: creates a plant whose image is the uploaded file.
#[instrument(skip(state, mp))]
pub async fn upload_plant(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let form = read_form(&mut mp).await?;

    if !form.saw_file {
        return Err(ApiError::bad_request("no se han mandado archivos"));
    }
    let Some(item) = form.archivo else {
        return Err(ApiError::bad_request("no se han mandado 'archivo'"));
    };

    let ext = item.extension();
    if !is_allowed_extension(ext) {
        warn!(file = %item.file_name, "upload rejected by extension");
        return Err(ApiError::bad_request(format!(
            "La extensión {ext} no está permitida {}",
            ALLOWED_EXTENSIONS.join(",")
        )));
    }

    let price = match form.precio.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<f64>().map(Some).map_err(|_| raw.to_string()),
    };
    let mut checks = Checks::new();
    checks
        .not_empty("nombre", form.nombre.as_deref(), "El nombre es obligatorio")
        .not_empty("categoria", form.categoria.as_deref(), "La categoria es obligatoria")
        .check("precio", &form.precio, price.is_ok(), "El precio debe ser un número");
    checks.finish()?;

    let plant = NewPlant {
        name: form.nombre.unwrap_or_default(),
        image: None,
        category: form.categoria.unwrap_or_default(),
        price: price.ok().flatten(),
    };
    let (plant, upload_path) = upload_plant_image(&state, plant, item).await?;

    info!(plant_id = %plant.id, path = %upload_path, "file uploaded");
    Ok(Json(UploadResponse {
        msg: "Archivo subido con éxito",
        upload_path,
        planta: PublicPlant::from(&plant),
    }))
}
