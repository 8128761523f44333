//! Rendering of streamed answers

pub mod reporter;
