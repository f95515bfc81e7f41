//! The Quill-style Delta content model.
//!
//! A document is an ordered sequence of insert operations, each a text
//! run or an embed, optionally carrying formatting attributes. This
//! module provides the typed model, its JSON wire encoding, and
//! position-based slicing.

mod types;

pub use types::{Attributes, Delta, DeltaError, DeltaOp, ImageInsert, Insert, ListKind};
