// src/auth.rs
use crate::core::database::{DatabaseConfig, Profile, ProfileService};
use anyhow::Result;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, warn};

const DEFAULT_KEYS_URL: &str =
    "https://www.googleapis.com/robot/v1/metadata/x509/securetoken@system.gserviceaccount.com";

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub aud: String, // identity project ID
    pub iss: String, // token issuer
    pub sub: String, // user ID (uid)
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    pub exp: usize,
    pub iat: usize,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
            email_verified: claims.email_verified,
        }
    }
}

pub struct AuthConfig {
    pub project_id: String,
    pub signing_keys: HashMap<String, String>, // kid -> public key PEM
}

impl AuthConfig {
    pub fn new(project_id: String) -> Self {
        Self {
            project_id,
            signing_keys: HashMap::new(),
        }
    }

    /// Fetch the identity provider's public keys for token verification
    pub async fn update_signing_keys(&mut self) -> Result<()> {
        let url =
            std::env::var("AUTH_KEYS_URL").unwrap_or_else(|_| DEFAULT_KEYS_URL.to_string());

        let response = reqwest::get(&url).await?;
        let keys: HashMap<String, String> = response.json().await?;

        self.signing_keys = keys;
        info!("Updated identity provider signing keys");

        Ok(())
    }
}

/// Authenticated user with their profile row. The profile is created on the
/// user's first authenticated request.
pub struct AuthenticatedUser {
    pub user: AuthUser,
    pub profile: Profile,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn email(&self) -> &str {
        &self.user.email
    }

    /// Folder key for this user's documents in the store
    pub fn user_key(&self) -> String {
        crate::core::database::email_to_folder_name(&self.user.email)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = AuthError;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let auth_config = match req.guard::<&State<AuthConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let db_config = match req.guard::<&State<DatabaseConfig>>().await {
            Outcome::Success(config) => config,
            Outcome::Error((status, _)) => {
                return Outcome::Error((status, AuthError::DatabaseError))
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        // Extract Authorization header
        let token = match req.headers().get_one("Authorization") {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            Some(_) => {
                warn!("Invalid Authorization header format");
                return Outcome::Error((Status::Unauthorized, AuthError::InvalidToken));
            }
            None => {
                warn!("Missing Authorization header");
                return Outcome::Error((Status::Unauthorized, AuthError::MissingToken));
            }
        };

        let user = match verify_identity_token(token, auth_config) {
            Ok(user) => user,
            Err(e) => {
                error!("Token verification failed: {}", e);
                return Outcome::Error((Status::Unauthorized, AuthError::TokenVerificationFailed));
            }
        };

        let pool = match db_config.pool() {
            Ok(pool) => pool,
            Err(e) => {
                error!("Database connection failed: {}", e);
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        let profile_service = ProfileService::new(pool);

        let profile = match profile_service
            .get_or_create(&user.uid, &user.email, user.name.as_deref())
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                error!(
                    "Failed to get or create profile for {}: {}",
                    user.email, e
                );
                return Outcome::Error((Status::InternalServerError, AuthError::DatabaseError));
            }
        };

        info!("User {} authenticated", user.email);

        Outcome::Success(AuthenticatedUser { user, profile })
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    TokenVerificationFailed,
    DatabaseError,
}

impl AuthError {
    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Authorization token required",
            AuthError::InvalidToken => "Invalid authorization token format",
            AuthError::TokenVerificationFailed => "Token verification failed",
            AuthError::DatabaseError => "Database error occurred",
        }
    }
}

fn verify_identity_token(token: &str, auth_config: &AuthConfig) -> Result<AuthUser> {
    // Decode header to get the key ID
    let header = jsonwebtoken::decode_header(token)?;
    let kid = header
        .kid
        .ok_or_else(|| anyhow::anyhow!("Missing kid in token header"))?;

    let public_key = auth_config
        .signing_keys
        .get(&kid)
        .ok_or_else(|| anyhow::anyhow!("Unknown key ID: {}", kid))?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&auth_config.project_id]);
    validation.set_issuer(&[format!(
        "https://securetoken.google.com/{}",
        auth_config.project_id
    )]);

    let decoding_key = DecodingKey::from_rsa_pem(public_key.as_bytes())?;
    let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

    Ok(token_data.claims.into())
}

// Optional auth guard that doesn't fail if no auth is provided
pub struct OptionalAuth {
    pub user: Option<AuthenticatedUser>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for OptionalAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match AuthenticatedUser::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(OptionalAuth { user: Some(auth) }),
            _ => Outcome::Success(OptionalAuth { user: None }),
        }
    }
}
