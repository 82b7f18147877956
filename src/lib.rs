//! cavid - scene-split video redaction
//!
//! Cuts a source video into one file per scene, lets an operator pick the
//! scenes to keep as they are, overlays a mask image on every other scene
//! and joins the result back into a single video.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, DefaultAppContainer, RedactionPipeline};
pub use config_initialization::{initialize_configuration_hierarchy, PipelineConfig};
pub use domain::errors::DomainError;
pub use domain::model::PipelineOutcome;
