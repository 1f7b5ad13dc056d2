//! Google ID token verification.
//!
//! Tokens are RS256 JWTs signed with one of the keys Google publishes as a
//! JWKS document. A token is accepted when its `kid` names a published key,
//! the signature checks out, it has not expired, its audience is our OAuth
//! client id and its issuer is Google.

use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Header, Validation};
use serde::Deserialize;
use tracing::debug;

use crate::config::GoogleConfig;

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Profile data taken from a verified token.
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleIdentity {
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleClaims {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> anyhow::Result<GoogleIdentity>;
}

pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
    certs_url: String,
}

impl GoogleVerifier {
    pub fn new(cfg: &GoogleConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            client_id: cfg.client_id.clone(),
            certs_url: cfg.certs_url.clone(),
        })
    }

    async fn fetch_keys(&self) -> anyhow::Result<JwkSet> {
        self.http
            .get(&self.certs_url)
            .send()
            .await
            .context("fetch google certs")?
            .error_for_status()
            .context("google certs status")?
            .json::<JwkSet>()
            .await
            .context("decode google certs")
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleVerifier {
    async fn verify(&self, id_token: &str) -> anyhow::Result<GoogleIdentity> {
        // Malformed tokens fail here, before going to the network.
        let header = decode_header(id_token).context("decode id token header")?;
        let keys = self.fetch_keys().await?;
        verify_with_keys(id_token, header, &keys, &self.client_id)
    }
}

pub(crate) fn verify_with_keys(
    id_token: &str,
    header: Header,
    keys: &JwkSet,
    client_id: &str,
) -> anyhow::Result<GoogleIdentity> {
    let kid = header.kid.context("id token has no kid")?;
    let jwk = keys
        .find(&kid)
        .with_context(|| format!("no google key with kid {kid}"))?;
    let key = DecodingKey::from_jwk(jwk).context("build decoding key")?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[client_id]);
    validation.set_issuer(&GOOGLE_ISSUERS);

    let data = decode::<GoogleClaims>(id_token, &key, &validation).context("verify id token")?;
    let email = data.claims.email.context("id token carries no email")?;
    debug!(%email, "google id token verified");

    Ok(GoogleIdentity {
        email,
        name: data.claims.name,
        picture: data.claims.picture,
    })
}
