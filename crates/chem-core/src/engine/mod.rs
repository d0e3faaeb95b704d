//! Engine module for ResolutionEngine implementation
//!
//! Provides the resolution engine and its builder.

pub mod builder;
pub mod core;

pub use builder::EngineBuilder;
pub use self::core::ResolutionEngine;
