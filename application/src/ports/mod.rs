//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement. The transcript repository port lives in the domain crate.

pub mod clock;
pub mod conversation_logger;
pub mod llm_gateway;
pub mod progress;
