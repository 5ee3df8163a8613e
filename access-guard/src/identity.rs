//! Identity provider seam
//!
//! Token verification and profile lookup stay behind a trait so the HTTP
//! layer can plug in a real verifier while tests use a canned one. The
//! guard itself never sees credentials; it only consumes the resolved
//! profile role.

use crate::error::AccessResult;
use async_trait::async_trait;
use records_dal::Role;
use serde_json::{Map, Value};

/// Outcome of verifying a bearer token
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    /// Stable identifier of the authenticated subject
    pub subject_id: String,
    /// Claims carried by the token beyond the subject
    pub claims: Map<String, Value>,
}

/// Directory entry resolved for an authenticated subject.
///
/// The role here, not anything inside the token, is what the guard
/// consults. A stale token cannot outrank a downgraded profile.
#[derive(Debug, Clone)]
pub struct SubjectProfile {
    pub role: Role,
    pub display_name: String,
    pub permissions: Vec<String>,
}

/// External identity provider: token verification plus profile lookup
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies a bearer token and returns its subject
    async fn verify_token(&self, token: &str) -> AccessResult<VerifiedToken>;

    /// Resolves the profile for a verified subject
    async fn profile(&self, subject_id: &str) -> AccessResult<SubjectProfile>;
}
