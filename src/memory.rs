//! In-memory stand-ins for the database, disk and Google, used by tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use mongodb::bson::oid::ObjectId;

use crate::auth::google::{GoogleIdentity, IdTokenVerifier};
use crate::plants::repo::PlantRepo;
use crate::plants::repo_types::{NewPlant, Plant, PlantPatch};
use crate::storage::StorageClient;
use crate::users::repo::{RoleRepo, UserRepo};
use crate::users::repo_types::{NewUser, User, UserPatch};

pub const GOOD_GOOGLE_TOKEN: &str = "google-ok";

// Same effect as the `$set` the mongo repos send.
fn apply_user_patch(user: &mut User, patch: UserPatch) {
    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(email) = patch.email {
        user.email = email;
    }
    if patch.image.is_some() {
        user.image = patch.image;
    }
    if let Some(role) = patch.role {
        user.role = role;
    }
    if let Some(google) = patch.google {
        user.google = google;
    }
    user.password = patch.password;
}

fn apply_plant_patch(plant: &mut Plant, patch: PlantPatch) {
    if let Some(name) = patch.name {
        plant.name = name;
    }
    if patch.image.is_some() {
        plant.image = patch.image;
    }
    if let Some(category) = patch.category {
        plant.category = category;
    }
    if patch.price.is_some() {
        plant.price = patch.price;
    }
}

#[derive(Default)]
pub struct MemoryUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepo for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let user = user.into_user(ObjectId::new());
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> anyhow::Result<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|u| u.id == id).map(|u| {
            apply_user_patch(u, patch);
            u.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() != before)
    }
}

pub struct MemoryRoles {
    names: Vec<String>,
}

impl MemoryRoles {
    pub fn new<const N: usize>(names: [&str; N]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }
}

#[async_trait]
impl RoleRepo for MemoryRoles {
    async fn exists(&self, role: &str) -> anyhow::Result<bool> {
        Ok(self.names.iter().any(|n| n == role))
    }
}

#[derive(Default)]
pub struct MemoryPlants {
    rows: Mutex<Vec<Plant>>,
}

#[async_trait]
impl PlantRepo for MemoryPlants {
    async fn find(&self, id: ObjectId) -> anyhow::Result<Option<Plant>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> anyhow::Result<Vec<Plant>> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn create(&self, plant: NewPlant) -> anyhow::Result<Plant> {
        let plant = plant.into_plant(ObjectId::new());
        self.rows.lock().unwrap().push(plant.clone());
        Ok(plant)
    }

    async fn update(&self, id: ObjectId, patch: PlantPatch) -> anyhow::Result<Option<Plant>> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|p| p.id == id).map(|p| {
            apply_plant_patch(p, patch);
            p.clone()
        }))
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    pub files: Mutex<HashMap<String, Bytes>>,
    fail: bool,
}

impl MemoryStorage {
    /// Storage whose writes always fail.
    pub fn failing() -> Self {
        Self {
            files: Mutex::default(),
            fail: true,
        }
    }
}

#[axum::async_trait]
impl StorageClient for MemoryStorage {
    async fn put_object(&self, key: &str, body: Bytes) -> anyhow::Result<String> {
        anyhow::ensure!(!self.fail, "disk full");
        self.files.lock().unwrap().insert(key.to_string(), body);
        Ok(format!("mem://{key}"))
    }
}

/// Accepts only [`GOOD_GOOGLE_TOKEN`].
pub struct FakeGoogle;

#[async_trait]
impl IdTokenVerifier for FakeGoogle {
    async fn verify(&self, id_token: &str) -> anyhow::Result<GoogleIdentity> {
        anyhow::ensure!(id_token == GOOD_GOOGLE_TOKEN, "bad signature");
        Ok(GoogleIdentity {
            email: "ana.google@gmail.com".into(),
            name: Some("Ana Google".into()),
            picture: Some("https://lh3.googleusercontent.com/a/ana".into()),
        })
    }
}
