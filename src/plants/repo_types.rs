use mongodb::bson::{doc, oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

/// Plant document in the `plantas` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>, // file name under the upload dir
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "precio", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub image: Option<String>,
    pub category: String,
    pub price: Option<f64>,
}

impl NewPlant {
    pub fn into_plant(self, id: ObjectId) -> Plant {
        Plant {
            id,
            name: self.name,
            image: self.image,
            category: self.category,
            price: self.price,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlantPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

impl PlantPatch {
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("nombre", name.as_str());
        }
        if let Some(image) = &self.image {
            set.insert("imagen", image.as_str());
        }
        if let Some(category) = &self.category {
            set.insert("categoria", category.as_str());
        }
        if let Some(price) = self.price {
            set.insert("precio", price);
        }
        set
    }
}
