use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};

use super::repo_types::{NewPlant, Plant, PlantPatch};

#[async_trait]
pub trait PlantRepo: Send + Sync {
    async fn find(&self, id: ObjectId) -> anyhow::Result<Option<Plant>>;
    async fn list(&self) -> anyhow::Result<Vec<Plant>>;
    async fn create(&self, plant: NewPlant) -> anyhow::Result<Plant>;
    async fn update(&self, id: ObjectId, patch: PlantPatch) -> anyhow::Result<Option<Plant>>;
    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct MongoPlants {
    coll: Collection<Plant>,
}

impl MongoPlants {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection("plantas"),
        }
    }
}

#[async_trait]
impl PlantRepo for MongoPlants {
    async fn find(&self, id: ObjectId) -> anyhow::Result<Option<Plant>> {
        self.coll
            .find_one(doc! { "_id": id }, None)
            .await
            .context("find plant")
    }

    async fn list(&self) -> anyhow::Result<Vec<Plant>> {
        let cursor = self.coll.find(None, None).await.context("list plants")?;
        cursor.try_collect().await.context("collect plants")
    }

    async fn create(&self, plant: NewPlant) -> anyhow::Result<Plant> {
        let plant = plant.into_plant(ObjectId::new());
        self.coll
            .insert_one(&plant, None)
            .await
            .context("insert plant")?;
        Ok(plant)
    }

    async fn update(&self, id: ObjectId, patch: PlantPatch) -> anyhow::Result<Option<Plant>> {
        let set = patch.to_set_document();
        // mongo rejects an empty $set
        if set.is_empty() {
            return self.find(id).await;
        }
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, options)
            .await
            .context("update plant")
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let res = self
            .coll
            .delete_one(doc! { "_id": id }, None)
            .await
            .context("delete plant")?;
        Ok(res.deleted_count > 0)
    }
}
