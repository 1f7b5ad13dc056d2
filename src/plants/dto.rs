use serde::{Deserialize, Serialize};

use super::repo_types::{Plant, PlantPatch};

/// Plant as returned to clients: storage `_id` becomes `id`.
#[derive(Debug, Clone, Serialize)]
pub struct PublicPlant {
    pub id: String,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imagen: Option<String>,
    pub categoria: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
}

impl From<&Plant> for PublicPlant {
    fn from(p: &Plant) -> Self {
        Self {
            id: p.id.to_hex(),
            nombre: p.name.clone(),
            imagen: p.image.clone(),
            categoria: p.category.clone(),
            precio: p.price,
        }
    }
}

/// Body for create and update.
#[derive(Debug, Default, Deserialize)]
pub struct PlantRequest {
    pub nombre: Option<String>,
    pub imagen: Option<String>,
    pub categoria: Option<String>,
    pub precio: Option<f64>,
}

impl From<PlantRequest> for PlantPatch {
    fn from(r: PlantRequest) -> Self {
        Self {
            name: r.nombre,
            image: r.imagen,
            category: r.categoria,
            price: r.precio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlantCreatedResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub planta: PublicPlant,
}

#[derive(Debug, Serialize)]
pub struct PlantUpdatedResponse {
    pub ok: bool,
    pub msg: &'static str,
    pub body: PublicPlant,
}
