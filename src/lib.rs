//! Certificate rendering and artifact-storage pipeline.
//!
//! Turns structured achievement records into rendered certificate documents
//! (PDF, HTML, PNG/JPEG) and persists them under deterministic keys in an
//! object store.
//!
//! The pipeline is composed leaf-first:
//! - [`templates`] - pure markup generation, one function per visual variant
//! - [`render`] - ordered fallback chains over external conversion tools
//! - [`generator`] - per-format generators and the factory that selects them
//! - [`storage`] - key scheme, metadata tagging and archive/copy operations
//!
//! Eligibility checks, the HTTP surface and relational persistence are the
//! caller's concern; this crate starts at "render this certificate" and ends
//! at a storage key.

pub mod config;
pub mod format;
pub mod generator;
pub mod model;
pub mod render;
pub mod storage;
pub mod templates;

pub use config::{RendererConfig, SupabaseConfig};
pub use format::{FormatCategory, OutputFormat, UnsupportedFormat};
pub use generator::{CertificateGenerator, GeneratorError, GeneratorFactory};
pub use model::CertificateRecord;
pub use render::{RenderChain, RenderError};
pub use storage::{ArchiveRecord, CertificateStore, ObjectStorage, StorageError};
pub use templates::{TemplateError, TemplateVariant};
