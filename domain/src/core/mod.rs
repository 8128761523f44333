//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat-completion models offered by the selector
//! - [`focus::Focus`]: the cosmetic conversational mode label
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod focus;
pub mod model;
pub mod string;
