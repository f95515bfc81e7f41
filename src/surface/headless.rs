use std::collections::HashSet;

use tracing::debug;

use crate::config::SpawnConfig;
use crate::delta::{Attributes, Delta, DeltaOp, Insert};

use super::{MountTarget, SpawnError, Surface, SurfaceFactory};

/// An in-memory rich-text editing surface.
///
/// Holds a normalized [`Delta`] document that always ends with a `"\n"`
/// text run, matching the Quill invariant that an empty editor reports
/// `{"ops":[{"insert":"\n"}]}`. Editing operations rebuild the document
/// from slices, so positions are character positions and embeds count
/// as one position throughout.
pub struct HeadlessSurface {
    doc: Delta,
    config: SpawnConfig,
    mount: MountTarget,
}

impl HeadlessSurface {
    fn new(mount: MountTarget, config: SpawnConfig) -> Self {
        let mut doc = Delta::new();
        doc.push(DeltaOp::text("\n"));
        Self { doc, config, mount }
    }

    /// The configuration this surface was spawned with.
    pub const fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// The mount point this surface is attached to.
    pub const fn mount(&self) -> &MountTarget {
        &self.mount
    }

    /// True while the document holds nothing but the trailing newline,
    /// i.e. while the placeholder text would be shown.
    pub fn placeholder_visible(&self) -> bool {
        self.doc.ops == vec![DeltaOp::text("\n")]
    }

    /// Insert a text run at `index`, clamped so nothing lands after the
    /// trailing newline. Formats without a toolbar feature are stripped
    /// from `attributes`.
    pub fn insert_text(&mut self, index: usize, text: &str, attributes: Option<&Attributes>) {
        if text.is_empty() {
            return;
        }
        let attrs = attributes.map(|a| self.config.sanitize(a)).unwrap_or_default();
        self.splice(index, DeltaOp::text_with(text, attrs));
    }

    /// Insert an image embed at `index`. Ignored when the toolbar has no
    /// image feature.
    pub fn insert_embed(&mut self, index: usize, url: &str) {
        if !self.config.allows_image() {
            debug!(mount = %self.mount, "image embed dropped, toolbar feature disabled");
            return;
        }
        self.splice(index, DeltaOp::image(url));
    }

    /// Delete `length` positions starting at `index`.
    pub fn delete(&mut self, index: usize, length: usize) {
        if length == 0 {
            return;
        }
        let head = self.doc.slice(0, index);
        let tail = self.doc.slice_from(index.saturating_add(length));
        self.doc = head.concat(tail);
        self.ensure_trailing_newline();
    }

    /// Merge `patch` into the attributes of every position in
    /// `[index, index + length)`. Formats without a toolbar feature are
    /// stripped from the patch before it is applied.
    pub fn format(&mut self, index: usize, length: usize, patch: &Attributes) {
        if length == 0 {
            return;
        }
        let patch = self.config.sanitize(patch);
        if patch.is_empty() {
            return;
        }
        let head = self.doc.slice(0, index);
        let tail = self.doc.slice_from(index.saturating_add(length));
        let mut middle = Delta::new();
        for op in self.doc.slice(index, index + length).ops {
            let merged = op
                .attributes
                .clone()
                .unwrap_or_default()
                .merged(&patch);
            middle.push(DeltaOp {
                insert: op.insert,
                attributes: if merged.is_empty() { None } else { Some(merged) },
            });
        }
        self.doc = head.concat(middle).concat(tail);
    }

    /// Replace the whole document. The input is re-normalized and a
    /// trailing newline is appended when missing.
    pub fn set_contents(&mut self, delta: Delta) {
        self.doc = delta.ops.into_iter().collect();
        self.ensure_trailing_newline();
        debug!(mount = %self.mount, len = self.doc.len(), "surface contents replaced");
    }

    // Insert position is capped at len - 1: nothing may land after the
    // trailing newline.
    fn splice(&mut self, index: usize, op: DeltaOp) {
        let index = index.min(self.doc.len().saturating_sub(1));
        let head = self.doc.slice(0, index);
        let tail = self.doc.slice_from(index);
        let mut middle = Delta::new();
        middle.push(op);
        self.doc = head.concat(middle).concat(tail);
    }

    fn ensure_trailing_newline(&mut self) {
        let ends_with_newline = self
            .doc
            .ops
            .last()
            .is_some_and(|op| matches!(&op.insert, Insert::Text(text) if text.ends_with('\n')));
        if !ends_with_newline {
            self.doc.push(DeltaOp::text("\n"));
        }
    }
}

impl Surface for HeadlessSurface {
    fn contents(&self) -> Delta {
        self.doc.clone()
    }

    fn contents_from(&self, index: usize) -> Delta {
        self.doc.slice_from(index)
    }

    fn contents_in_range(&self, index: usize, length: usize) -> Delta {
        self.doc.slice(index, index.saturating_add(length))
    }

    fn len(&self) -> usize {
        self.doc.len()
    }
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("mount", &self.mount)
            .field("len", &self.doc.len())
            .field("theme", &self.config.theme)
            .finish()
    }
}

/// A host with a fixed set of mount points.
///
/// Stands in for the page the original widget would attach to: creating
/// a surface at an unregistered mount fails the same way a missing DOM
/// node would.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    mounts: HashSet<MountTarget>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with a single registered mount point.
    pub fn with_mount(mount: MountTarget) -> Self {
        let mut host = Self::new();
        host.register(mount);
        host
    }

    /// Make `mount` available for surface creation.
    pub fn register(&mut self, mount: MountTarget) {
        self.mounts.insert(mount);
    }
}

impl SurfaceFactory for HeadlessHost {
    type Surface = HeadlessSurface;

    fn create(
        &self,
        mount: &MountTarget,
        config: &SpawnConfig,
    ) -> Result<Self::Surface, SpawnError> {
        if !self.mounts.contains(mount) {
            return Err(SpawnError::UnknownMount(mount.clone()));
        }
        Ok(HeadlessSurface::new(mount.clone(), config.clone()))
    }
}
