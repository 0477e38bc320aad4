//! Configuration for image transclusion
//!
//! This module provides the `TransclusionConfig` struct and its type-safe builder.
//! The configuration is passed explicitly to every operation, so differently
//! configured conversions can run side by side.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{TransclusionConfigBuilder, WithUploadDir, WithUrlPrefix};
pub use types::TransclusionConfig;
