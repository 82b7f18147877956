// Application layer - Pipeline stages and their orchestration

pub mod checkpoint_gate;
pub mod cleanup;
pub mod concatenator;
pub mod container;
pub mod normalizer;
pub mod pipeline;
pub mod redactor;
pub mod scene_splitter;
pub mod workspace;

// Re-export stages
pub use checkpoint_gate::CheckpointGate;
pub use cleanup::Cleanup;
pub use concatenator::{ConcatenationReport, Concatenator};
pub use container::{AppContainer, DefaultAppContainer};
pub use normalizer::Normalizer;
pub use pipeline::{PipelinePorts, RedactionPipeline};
pub use redactor::{RedactionReport, Redactor};
pub use scene_splitter::SceneSplitter;
pub use workspace::Workspace;
