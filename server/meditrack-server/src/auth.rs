//! Bearer token authentication
//!
//! `AuthContext` resolves the caller in two steps: verify the JWT from the
//! Authorization header, then look up the subject's profile record. The
//! role the policy table consults comes from the profile, never from token
//! claims, so a stale token cannot outrank a downgraded profile.

use crate::error::ApiError;
use crate::server::MediTrackServer;
use access_guard::{AccessError, AccessResult, IdentityProvider, SubjectProfile, VerifiedToken};
use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use records_dal::{RecordsDal, Role, User};
use serde::Deserialize;

/// Authentication context extracted from the bearer token
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Subject id from the verified token; matches a user document id
    pub user_id: String,
    /// Role from the caller's profile record
    pub role: Role,
    /// Display name from the caller's profile record
    pub display_name: String,
}

/// Claims carried by MediTrack bearer tokens.
///
/// `exp` is enforced by the verifier without appearing here.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

/// HS256 token verifier with profile lookup through the users collection
pub struct JwtIdentityProvider {
    decoding_key: DecodingKey,
    validation: Validation,
    dal: RecordsDal,
}

impl JwtIdentityProvider {
    pub fn new(secret: &[u8], dal: RecordsDal) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            dal,
        }
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify_token(&self, token: &str) -> AccessResult<VerifiedToken> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|err| AccessError::InvalidToken(err.to_string()))?;

        Ok(VerifiedToken {
            subject_id: data.claims.sub,
            claims: data.claims.extra,
        })
    }

    async fn profile(&self, subject_id: &str) -> AccessResult<SubjectProfile> {
        let user: User =
            self.dal
                .get(subject_id)
                .await
                .map_err(|_| AccessError::UnknownSubject {
                    subject_id: subject_id.to_string(),
                })?;

        Ok(SubjectProfile {
            role: user.role,
            display_name: user.display_name,
            permissions: user.permissions,
        })
    }
}

/// Extract the bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<String, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::authentication("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| {
            ApiError::authentication("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    MediTrackServer: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let server = MediTrackServer::from_ref(state);

        let token = extract_token(parts)?;
        let verified = server.identity.verify_token(&token).await?;
        let profile = server.identity.profile(&verified.subject_id).await?;

        Ok(AuthContext {
            user_id: verified.subject_id,
            role: profile.role,
            display_name: profile.display_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_store::StoreClient;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use records_dal::NewUser;
    use serde::Serialize;

    const SECRET: &[u8] = b"unit-test-secret";

    #[derive(Serialize)]
    struct Claims<'a> {
        sub: &'a str,
        exp: i64,
    }

    fn mint(sub: &str, secret: &[u8]) -> String {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp();
        encode(
            &Header::default(),
            &Claims { sub, exp },
            &EncodingKey::from_secret(secret),
        )
        .expect("token encodes")
    }

    fn provider() -> JwtIdentityProvider {
        JwtIdentityProvider::new(SECRET, RecordsDal::new(StoreClient::in_memory()))
    }

    #[tokio::test]
    async fn round_trips_the_subject() {
        let provider = provider();
        let token = mint("user-42", SECRET);
        let verified = provider.verify_token(&token).await.unwrap();
        assert_eq!(verified.subject_id, "user-42");
    }

    #[tokio::test]
    async fn rejects_a_token_signed_with_another_secret() {
        let provider = provider();
        let token = mint("user-42", b"other-secret");
        let err = provider.verify_token(&token).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn rejects_an_expired_token() {
        let provider = provider();
        let exp = (chrono::Utc::now() - chrono::Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &Claims { sub: "user-42", exp },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        let err = provider.verify_token(&token).await.unwrap_err();
        assert!(matches!(err, AccessError::InvalidToken(_)));
    }

    #[tokio::test]
    async fn profile_lookup_reads_the_users_collection() {
        let dal = RecordsDal::new(StoreClient::in_memory());
        let provider = JwtIdentityProvider::new(SECRET, dal.clone());

        let user: User = dal
            .create(&NewUser {
                email: "asha@clinic.example".into(),
                display_name: "Asha".into(),
                role: Role::Nurse,
                username: None,
                doctor_id: None,
                hospital_id: None,
                affiliate_id: None,
                permissions: vec!["diet-plans:write".into()],
            })
            .await
            .unwrap();

        let profile = provider.profile(&user.id).await.unwrap();
        assert_eq!(profile.role, Role::Nurse);
        assert_eq!(profile.display_name, "Asha");
        assert_eq!(profile.permissions, vec!["diet-plans:write".to_string()]);

        let err = provider.profile("missing").await.unwrap_err();
        assert!(matches!(err, AccessError::UnknownSubject { .. }));
    }
}
