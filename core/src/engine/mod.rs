pub mod manifest;

pub use manifest::{ManifestEngine, RunManifest};
