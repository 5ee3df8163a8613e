//! Role-based access guard for the records DAL
//!
//! One static table maps every (resource, operation) pair to the roles
//! allowed to perform it. Callers resolve the role from the authenticated
//! identity's profile record, then check the table before any store round
//! trip; a deny never touches the DAL.
//!
//! # Example
//!
//! ```rust
//! use access_guard::{AccessGuard, Operation};
//! use records_dal::{Resource, Role};
//!
//! let guard = AccessGuard::new();
//! assert!(guard.check(Role::Staff, Resource::Patients, Operation::Write));
//! assert!(guard.ensure(Role::Nurse, Resource::Users, Operation::Write).is_err());
//! ```

pub mod error;
pub mod guard;
pub mod identity;
pub mod policy;

pub use error::{AccessError, AccessResult};
pub use guard::AccessGuard;
pub use identity::{IdentityProvider, SubjectProfile, VerifiedToken};
pub use policy::{allowed_roles, Operation};
