//! Accounting arithmetic for the affiliate and billing modules
//!
//! Every business constant lives in one place and every derived figure is a
//! pure function over already-fetched records:
//! - Affiliate commission summaries and monthly rollups
//! - Invoice tax breakdowns and paid-revenue totals
//! - Subscription plan pricing, trial windows, and account standing

pub mod account;
pub mod commission;
pub mod constants;
pub mod error;
pub mod invoice;

pub use account::*;
pub use commission::*;
pub use constants::*;
pub use error::*;
pub use invoice::*;
