use anyhow::Context;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Database,
};
use tracing::info;

use crate::{config::AppConfig, error::ApiError};

/// Connects and pings, so a bad connection string fails at start-up rather
/// than on the first request.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Database> {
    let mut options = ClientOptions::parse(&config.database_url)
        .await
        .context("parse MONGODB_URI")?;
    options.app_name = Some("vivero".into());
    let client = Client::with_options(options).context("build mongodb client")?;
    let db = client.database(&config.database_name);
    db.run_command(doc! { "ping": 1 }, None)
        .await
        .context("connect to database")?;
    info!(database = %config.database_name, "database connected");
    Ok(db)
}

/// Parses a path id into an ObjectId.
pub fn parse_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::bad_request("id no válido"))
}
