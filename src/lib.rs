// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. delta::DeltaOp)
    clippy::module_name_repetitions
)]

//! # Quillkit
//!
//! A headless rich-text editor adapter with a Quill-style Delta content
//! model.
//!
//! Quillkit owns at most one editing surface at a time and answers
//! content queries against it:
//! - Typed Delta documents with the Quill JSON wire format
//! - Position-based slicing (full document, suffix, bounded range)
//! - A trait seam for the editing capability, with a headless
//!   in-memory implementation
//! - Markdown rendering of Delta documents
//!
//! ## Architecture
//!
//! The [`adapter::EditorAdapter`] is deliberately thin: it attaches a
//! surface created by a [`surface::SurfaceFactory`] at a validated
//! mount target, forwards content queries to it, and serializes the
//! results. All document semantics live in the [`delta`] model; all
//! editing semantics live in the surface implementation.
//!
//! ## Modules
//!
//! - [`adapter`]: Surface ownership and content queries
//! - [`delta`]: The Delta document model and wire format
//! - [`surface`]: The editing-capability seam and headless surface
//! - [`markdown`]: Delta to Markdown rendering
//! - [`config`]: Spawn configuration and saved CLI defaults

pub mod adapter;
pub mod config;
pub mod delta;
pub mod markdown;
pub mod surface;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::adapter::{AdapterError, EditorAdapter};
    pub use crate::config::{SpawnConfig, Theme, ToolbarItem};
    pub use crate::delta::{Attributes, Delta, DeltaOp, Insert, ListKind};
    pub use crate::surface::{HeadlessHost, HeadlessSurface, MountTarget, Surface};
}
