// Service exports
pub mod artifacts;

pub use artifacts::{ArtifactLoader, ArtifactPaths, ArtifactError};
