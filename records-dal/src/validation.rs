//! Draft validation macros
//!
//! Shared helpers behind [`RecordDraft::validate`](crate::record::RecordDraft)
//! and [`RecordPatch::validate`](crate::record::RecordPatch) implementations.
//! Every macro returns early with [`DalError::Validation`](crate::error::DalError)
//! so rejected payloads never reach the store.

/// Macro for validating fields with custom predicates
///
/// # Usage
///
/// ```ignore
/// validate_field!(self.email, !self.email.trim().is_empty(), "Email is required");
/// validate_field!(self.amount, self.amount >= 0.0, "Amount cannot be negative");
/// ```
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::DalError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
///
/// # Usage
///
/// ```ignore
/// validate_required!(self.name, "Name is required");
/// ```
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating string length
///
/// # Usage
///
/// ```ignore
/// validate_length!(self.name, 2, 100, "Name must be between 2 and 100 characters");
/// ```
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        let len = $field.len();
        $crate::validate_field!($field, len >= $min && len <= $max, $message);
    };
}

/// Macro for validating email format (basic check)
///
/// # Usage
///
/// ```ignore
/// validate_email!(self.email, "Invalid email format");
/// ```
#[macro_export]
macro_rules! validate_email {
    ($field:expr, $message:expr) => {
        $crate::validate_field!($field, $field.contains('@') && $field.contains('.'), $message);
    };
}

/// Macro for validating numeric ranges
///
/// # Usage
///
/// ```ignore
/// validate_range!(self.age, 0, 150, "Age must be between 0 and 150");
/// ```
#[macro_export]
macro_rules! validate_range {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        $crate::validate_field!($field, $field >= $min && $field <= $max, $message);
    };
}
