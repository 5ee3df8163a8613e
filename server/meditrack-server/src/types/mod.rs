//! Shared request types used across endpoints

pub mod pagination;

pub use pagination::PaginationParams;
