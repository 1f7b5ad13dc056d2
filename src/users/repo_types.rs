use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// User document as stored in the `usuarios` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    pub password: String, // argon2 PHC string, or the OAuth placeholder
    #[serde(rename = "img", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(default)]
    pub google: bool,
}

/// Fields for a user that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: Option<String>,
    pub role: String,
    pub google: bool,
}

impl NewUser {
    pub fn into_user(self, id: ObjectId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            image: self.image,
            role: self.role,
            google: self.google,
        }
    }
}

/// Partial update. The password is always present because every update
/// stores a freshly hashed value.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
    pub google: Option<bool>,
    pub password: String,
}

impl UserPatch {
    /// `$set` document naming only the supplied fields.
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! { "password": self.password.as_str() };
        if let Some(name) = &self.name {
            set.insert("nombre", name.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("correo", email.as_str());
        }
        if let Some(image) = &self.image {
            set.insert("img", image.as_str());
        }
        if let Some(role) = &self.role {
            set.insert("rol", role.as_str());
        }
        if let Some(google) = self.google {
            set.insert("google", google);
        }
        set
    }
}
