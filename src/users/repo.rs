use anyhow::Context;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};

use super::repo_types::{NewUser, User, UserPatch};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    async fn create(&self, user: NewUser) -> anyhow::Result<User>;
    /// Returns the updated user, or `None` when no user has that id.
    async fn update(&self, id: ObjectId, patch: UserPatch) -> anyhow::Result<Option<User>>;
    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait RoleRepo: Send + Sync {
    async fn exists(&self, role: &str) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct MongoUsers {
    coll: Collection<User>,
}

impl MongoUsers {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection("usuarios"),
        }
    }
}

#[async_trait]
impl UserRepo for MongoUsers {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        self.coll
            .find_one(doc! { "correo": email }, None)
            .await
            .context("find user by email")
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let cursor = self.coll.find(None, None).await.context("list users")?;
        cursor.try_collect().await.context("collect users")
    }

    async fn create(&self, user: NewUser) -> anyhow::Result<User> {
        let user = user.into_user(ObjectId::new());
        self.coll
            .insert_one(&user, None)
            .await
            .context("insert user")?;
        Ok(user)
    }

    async fn update(&self, id: ObjectId, patch: UserPatch) -> anyhow::Result<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.coll
            .find_one_and_update(
                doc! { "_id": id },
                doc! { "$set": patch.to_set_document() },
                options,
            )
            .await
            .context("update user")
    }

    async fn delete(&self, id: ObjectId) -> anyhow::Result<bool> {
        let res = self
            .coll
            .delete_one(doc! { "_id": id }, None)
            .await
            .context("delete user")?;
        Ok(res.deleted_count > 0)
    }
}

#[derive(Clone)]
pub struct MongoRoles {
    coll: Collection<Document>,
}

impl MongoRoles {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection("roles"),
        }
    }
}

#[async_trait]
impl RoleRepo for MongoRoles {
    async fn exists(&self, role: &str) -> anyhow::Result<bool> {
        let n = self
            .coll
            .count_documents(doc! { "rol": role }, None)
            .await
            .context("count roles")?;
        Ok(n > 0)
    }
}
