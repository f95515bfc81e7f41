//! The editing-capability seam.
//!
//! A [`Surface`] is the content-query contract of a rich-text editing
//! capability; a [`SurfaceFactory`] creates one at a validated
//! [`MountTarget`]. [`HeadlessSurface`] is the in-memory implementation
//! used by the CLI and tests.

mod headless;

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::config::SpawnConfig;
use crate::delta::Delta;

pub use headless::{HeadlessHost, HeadlessSurface};

/// Failure to create an editing surface.
#[derive(Debug, Error)]
pub enum SpawnError {
    /// The mount selector is syntactically invalid.
    #[error("invalid mount target {0:?}")]
    InvalidMount(String),
    /// The mount selector is well-formed but names no known mount point.
    #[error("no mount point registered for {0}")]
    UnknownMount(MountTarget),
}

/// A mount-point selector: `#id`, `.class`, or a bare element name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MountTarget(String);

impl MountTarget {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for MountTarget {
    type Err = SpawnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = match s.strip_prefix(['#', '.']) {
            Some(name) => {
                !name.is_empty()
                    && name
                        .chars()
                        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
            }
            None => !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()),
        };
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(SpawnError::InvalidMount(s.to_string()))
        }
    }
}

impl fmt::Display for MountTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content queries every editing capability must answer.
///
/// Indices are character positions in the document's index space (embeds
/// count as one position). Out-of-range bounds clamp to the document end.
pub trait Surface {
    /// The full document.
    fn contents(&self) -> Delta;

    /// The suffix of the document starting at `index`.
    fn contents_from(&self, index: usize) -> Delta;

    /// The slice `[index, index + length)` of the document.
    fn contents_in_range(&self, index: usize, length: usize) -> Delta;

    /// Document length in positions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Creates editing surfaces at mount points.
///
/// Mount validation belongs to the factory: an adapter passes the target
/// through and propagates whatever the factory rejects.
pub trait SurfaceFactory {
    type Surface: Surface;

    /// Create a surface at `mount` with the given configuration.
    ///
    /// # Errors
    /// Returns [`SpawnError`] when the mount target is not acceptable.
    fn create(&self, mount: &MountTarget, config: &SpawnConfig) -> Result<Self::Surface, SpawnError>;
}
