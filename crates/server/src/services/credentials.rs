use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::{models::User, Database},
    error::AppError,
};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("User not found")]
    NotFound,

    #[error("Invalid password")]
    InvalidCredential,

    #[error("Failed to hash password")]
    Hashing,

    #[error("Failed to create token")]
    Token,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::Database(e) => AppError::Database(e),
            internal @ (CredentialError::Hashing | CredentialError::Token) => {
                AppError::Internal(internal.to_string())
            }
            other => AppError::Validation(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CredentialError>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user email
    pub exp: usize,
}

#[derive(Clone)]
pub struct CredentialService {
    db: Database,
    jwt_secret: String,
}

impl CredentialService {
    pub fn new(db: Database, jwt_secret: String) -> Self {
        Self { db, jwt_secret }
    }

    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        if self.db.email_exists(&new_user.email).await? {
            return Err(CredentialError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            password_hash: hash_password(&new_user.password)?,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            created_at: Utc::now(),
            last_login: None,
        };

        // A concurrent registration can win the race after the check above.
        self.db.insert_user(&user).await.map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CredentialError::DuplicateEmail
            }
            other => CredentialError::Database(other),
        })?;
        tracing::info!(user_id = %user.id, "Registered user");

        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let mut user = self
            .db
            .find_user_by_email(email)
            .await?
            .ok_or(CredentialError::NotFound)?;

        if !verify_password(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Rejected login");
            return Err(CredentialError::InvalidCredential);
        }

        let now = Utc::now();
        self.db.touch_last_login(&user.id, now).await?;
        user.last_login = Some(now);

        Ok(user)
    }

    pub async fn current_user(&self, email: &str) -> Result<User> {
        self.db
            .find_user_by_email(email)
            .await?
            .ok_or(CredentialError::NotFound)
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::days(7))
            .ok_or(CredentialError::Token)?
            .timestamp() as usize;

        let claims = Claims {
            sub: user.email.clone(),
            exp: expiration,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| CredentialError::Token)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| CredentialError::Hashing)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| CredentialError::Hashing)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
