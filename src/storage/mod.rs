//! Storage layer for table artifacts.
//!
//! - `registry`: caller-owned emission order
//! - `store`: writes artifacts into the tables directory
//! - `consolidate`: replays the registry into one document
//! - `manifest`: JSONL persistence of the registry across runs

pub mod consolidate;
pub mod manifest;
pub mod registry;
pub mod store;

pub use consolidate::{CONSOLIDATED_NAME, ConsolidationReport, consolidate_tex, render_consolidated};
pub use manifest::{ManifestEntry, RegistryManifest};
pub use registry::ArtifactRegistry;
pub use store::{SaveOutcome, StoreConfig, TEX_EXTENSION, TexStore, WrapOptions};
