use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use reqwest::blocking::Client;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

pub const SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Contents of a google credentials file.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credentials {
    ServiceAccount(ServiceAccount),
    AuthorizedUser(AuthorizedUser),
}

#[derive(Deserialize)]
pub struct ServiceAccount {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

#[derive(Deserialize)]
pub struct AuthorizedUser {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

fn default_token_uri() -> String {
    TOKEN_URI.into()
}

#[derive(Clone, Deserialize)]
#[cfg_attr(test, derive(Debug))]
pub struct AccessToken {
    pub access_token: String,
}

impl Credentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|err| {
            Error::Auth(format!("failed to read credentials {}: {}", path.display(), err))
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::Auth(format!("invalid credentials: {err}")))
    }

    /// Exchanges the credentials for an access token.
    pub fn token(&self, client: &Client) -> Result<AccessToken> {
        match self {
            Self::ServiceAccount(account) => {
                let assertion = account.assertion(chrono::Utc::now().timestamp())?;
                log::debug!("requesting token for {}", account.client_email);
                request_token(
                    client,
                    &account.token_uri,
                    &[("grant_type", JWT_BEARER), ("assertion", assertion.as_str())],
                )
            }
            Self::AuthorizedUser(user) => {
                log::debug!("refreshing token for client {}", user.client_id);
                request_token(
                    client,
                    TOKEN_URI,
                    &[
                        ("grant_type", "refresh_token"),
                        ("client_id", user.client_id.as_str()),
                        ("client_secret", user.client_secret.as_str()),
                        ("refresh_token", user.refresh_token.as_str()),
                    ],
                )
            }
        }
    }
}

fn request_token(client: &Client, uri: &str, form: &[(&str, &str)]) -> Result<AccessToken> {
    let resp = client.post(uri).form(form).send().map_err(Error::auth)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(Error::Auth(format!(
            "POST {uri} returned status code {status}: {body}"
        )));
    }
    resp.json().map_err(Error::auth)
}

#[derive(Serialize)]
struct Header<'a> {
    alg: &'static str,
    typ: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<&'a str>,
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'static str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

impl ServiceAccount {
    /// Signed JWT used for the `jwt-bearer` grant.
    pub fn assertion(&self, issued_at: i64) -> Result<String> {
        let signer = Signer::new(&self.private_key)?;
        let header = Header {
            alg: "RS256",
            typ: "JWT",
            kid: self.private_key_id.as_deref(),
        };
        let claims = Claims {
            iss: &self.client_email,
            scope: SCOPE,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };
        let mut jwt = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);
        let signature = signer.sign(jwt.as_bytes())?;
        jwt.push('.');
        jwt.push_str(&URL_SAFE_NO_PAD.encode(signature));
        Ok(jwt)
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(Error::auth)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// RS256 signer for a PKCS#8 private key.
pub struct Signer {
    key: RsaPrivateKey,
}

impl Signer {
    pub fn new(private_key: &str) -> Result<Self> {
        let key = RsaPrivateKey::from_pkcs8_pem(private_key).map_err(Error::auth)?;
        Ok(Self { key })
    }

    pub fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>> {
        let digest = Sha256::digest(bytes);
        self.key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(Error::auth)
    }

    pub fn pubkey(&self) -> RsaPublicKey {
        self.key.to_public_key()
    }
}
