// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogStore,
    models::auth::{Claims, SignInPayload, SignUpPayload, TokenKind, TokenPair},
};

/// Parâmetros de emissão de tokens e de hashing de senha.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub access_ttl: chrono::Duration,
    pub refresh_ttl: chrono::Duration,
    pub bcrypt_cost: u32,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CatalogStore>,
    settings: Arc<TokenSettings>,
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized(anyhow::anyhow!("invalid credentials"))
}

impl AuthService {
    pub fn new(store: Arc<dyn CatalogStore>, settings: TokenSettings) -> Self {
        Self { store, settings: Arc::new(settings) }
    }

    pub async fn sign_up(&self, payload: &SignUpPayload) -> Result<TokenPair, AppError> {
        // bcrypt é CPU-bound: roda fora do executor
        let password = payload.password.clone();
        let cost = self.settings.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("falha na task de hashing: {e}")))??;

        let admin = self
            .store
            .create_admin_user(&payload.email, &password_hash)
            .await?;

        tracing::info!(admin_id = admin.id, "administrador cadastrado");
        self.issue_pair(admin.id)
    }

    pub async fn sign_in(&self, payload: &SignInPayload) -> Result<TokenPair, AppError> {
        let admin = self
            .store
            .find_admin_by_email(&payload.email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let password = payload.password.clone();
        let password_hash = admin.password_hash.clone();
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("falha na task de verificação de senha: {e}"))
            })??;

        if !is_password_valid {
            return Err(invalid_credentials());
        }

        self.issue_pair(admin.id)
    }

    /// Troca um refresh token válido por um novo par.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let admin_id = self.verify(refresh_token, TokenKind::Refresh)?;
        self.issue_pair(admin_id)
    }

    /// Valida um access token e devolve o id do administrador.
    pub fn validate_access_token(&self, token: &str) -> Result<i64, AppError> {
        self.verify(token, TokenKind::Access)
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<i64, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.settings.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| AppError::Unauthorized(anyhow::Error::new(e).context("invalid token")))?
        .claims;

        if claims.typ != expected {
            return Err(AppError::Unauthorized(anyhow::anyhow!(
                "expected {expected:?} token, got {:?}",
                claims.typ
            )));
        }

        claims
            .sub
            .parse()
            .map_err(|e| AppError::Unauthorized(anyhow::Error::new(e).context("invalid token subject")))
    }

    fn issue_pair(&self, admin_id: i64) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.create_token(admin_id, TokenKind::Access, self.settings.access_ttl)?,
            refresh_token: self.create_token(
                admin_id,
                TokenKind::Refresh,
                self.settings.refresh_ttl,
            )?,
        })
    }

    fn create_token(
        &self,
        admin_id: i64,
        typ: TokenKind,
        ttl: chrono::Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: admin_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ,
            iat: now.timestamp() as usize,
            nbf: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.settings.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::Error::new(e).context("failed to sign token")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryCatalogStore;
    use assert_matches::assert_matches;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(MemoryCatalogStore::new()),
            TokenSettings {
                secret: "test-secret".into(),
                access_ttl: chrono::Duration::minutes(15),
                refresh_ttl: chrono::Duration::days(7),
                bcrypt_cost: 4,
            },
        )
    }

    fn sign_up_payload() -> SignUpPayload {
        SignUpPayload { email: "admin@example.com".into(), password: "correct horse".into() }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_yields_valid_access_tokens() {
        let auth = service();
        let pair = auth.sign_up(&sign_up_payload()).await.unwrap();
        let admin_id = auth.validate_access_token(&pair.access_token).unwrap();

        let again = auth
            .sign_in(&SignInPayload {
                email: "admin@example.com".into(),
                password: "correct horse".into(),
            })
            .await
            .unwrap();

        assert_eq!(auth.validate_access_token(&again.access_token).unwrap(), admin_id);
        assert_ne!(pair.access_token, again.access_token);
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let auth = service();
        auth.sign_up(&sign_up_payload()).await.unwrap();

        let err = auth.sign_up(&sign_up_payload()).await.unwrap_err();

        assert_matches!(err, AppError::Conflict { message: "email already exists", .. });
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_are_unauthorized() {
        let auth = service();
        auth.sign_up(&sign_up_payload()).await.unwrap();

        let wrong = SignInPayload { email: "admin@example.com".into(), password: "nope nope".into() };
        let unknown = SignInPayload { email: "who@example.com".into(), password: "correct horse".into() };

        assert_matches!(auth.sign_in(&wrong).await, Err(AppError::Unauthorized(_)));
        assert_matches!(auth.sign_in(&unknown).await, Err(AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn tokens_cannot_stand_in_for_each_other() {
        let auth = service();
        let pair = auth.sign_up(&sign_up_payload()).await.unwrap();

        assert_matches!(auth.refresh(&pair.access_token).await, Err(AppError::Unauthorized(_)));
        assert_matches!(
            auth.validate_access_token(&pair.refresh_token),
            Err(AppError::Unauthorized(_))
        );

        let renewed = auth.refresh(&pair.refresh_token).await.unwrap();
        assert!(auth.validate_access_token(&renewed.access_token).is_ok());
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let auth = service();
        let other = AuthService::new(
            Arc::new(MemoryCatalogStore::new()),
            TokenSettings { secret: "other".into(), ..(*auth.settings).clone() },
        );
        let token = other.create_token(1, TokenKind::Access, chrono::Duration::minutes(5)).unwrap();

        assert_matches!(auth.validate_access_token(&token), Err(AppError::Unauthorized(_)));
    }
}
