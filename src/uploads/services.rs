use anyhow::Context;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::{
    plants::repo_types::{NewPlant, Plant},
    state::AppState,
};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

pub struct UploadItem {
    pub file_name: String,
    pub body: Bytes,
}

impl UploadItem {
    /// Text after the last `.` of the client-supplied name, or the whole
    /// name when it has no dot.
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or(&self.file_name)
    }
}

pub fn is_allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext)
}

pub fn random_file_name(ext: &str) -> String {
    format!("{}.{}", Uuid::new_v4(), ext)
}

/// Saves the plant record pointing at a fresh file name, then writes the
/// file. A failed write leaves the record in place.
pub async fn upload_plant_image(
    st: &AppState,
    plant: NewPlant,
    item: UploadItem,
) -> anyhow::Result<(Plant, String)> {
    let file_name = random_file_name(item.extension());
    let plant = st
        .plants
        .create(NewPlant {
            image: Some(file_name.clone()),
            ..plant
        })
        .await?;
    info!(plant_id = %plant.id, file = %file_name, "plant created for upload");

    let location = st
        .storage
        .put_object(&file_name, item.body)
        .await
        .with_context(|| format!("store upload {}", file_name))?;
    Ok((plant, location))
}
