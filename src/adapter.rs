//! The editor adapter: owns at most one editing surface and answers
//! content queries against it.
//!
//! The adapter has exactly two states, detached and attached. Queries on
//! a detached adapter fail with [`AdapterError::Detached`] instead of
//! faulting on a missing capability. [`EditorAdapter::spawn`] attaches a
//! surface at the default mount target supplied at construction;
//! [`EditorAdapter::spawn_at`] attaches at an explicit one. Re-spawning
//! drops the previous surface before the replacement is created, and
//! [`EditorAdapter::dispose`] tears the surface down deterministically.

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SpawnConfig;
use crate::surface::{MountTarget, SpawnError, Surface, SurfaceFactory};

/// Failure of a content query or serialization.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// A query was issued before a surface was attached.
    #[error("no editing surface attached; call spawn first")]
    Detached,
    /// The queried content could not be serialized.
    #[error("failed to serialize editor content: {0}")]
    Serialize(#[from] serde_json::Error),
}

enum Attachment<S> {
    Detached,
    Attached(S),
}

/// Adapter around a rich-text editing capability.
///
/// Generic over the [`SurfaceFactory`] that creates the capability, so
/// hosts and tests can substitute their own. Content queries return the
/// surface's Delta for the requested range serialized to JSON, with no
/// further transformation.
pub struct EditorAdapter<F: SurfaceFactory> {
    factory: F,
    default_mount: MountTarget,
    attachment: Attachment<F::Surface>,
}

impl<F: SurfaceFactory> EditorAdapter<F> {
    /// Create a detached adapter.
    ///
    /// `default_mount` is where [`EditorAdapter::spawn`] will attach;
    /// nothing is created until then.
    pub const fn new(factory: F, default_mount: MountTarget) -> Self {
        Self {
            factory,
            default_mount,
            attachment: Attachment::Detached,
        }
    }

    /// The mount target used by [`EditorAdapter::spawn`].
    pub const fn default_mount(&self) -> &MountTarget {
        &self.default_mount
    }

    /// Attach an editing surface at the default mount target.
    ///
    /// # Errors
    /// Propagates the factory's [`SpawnError`] unmodified.
    pub fn spawn(&mut self, config: SpawnConfig) -> Result<(), SpawnError> {
        let mount = self.default_mount.clone();
        self.spawn_at(&mount, config)
    }

    /// Attach an editing surface at an explicit mount target.
    ///
    /// A previously attached surface is dropped before the replacement
    /// is created; if creation then fails, the adapter stays detached.
    ///
    /// # Errors
    /// Propagates the factory's [`SpawnError`] unmodified.
    pub fn spawn_at(&mut self, mount: &MountTarget, config: SpawnConfig) -> Result<(), SpawnError> {
        if matches!(self.attachment, Attachment::Attached(_)) {
            warn!(%mount, "replacing attached editing surface");
            self.attachment = Attachment::Detached;
        }
        let surface = self.factory.create(mount, &config)?;
        debug!(%mount, theme = ?config.theme, "editing surface attached");
        self.attachment = Attachment::Attached(surface);
        Ok(())
    }

    /// Whether an editing surface is currently attached.
    pub const fn is_attached(&self) -> bool {
        matches!(self.attachment, Attachment::Attached(_))
    }

    /// Drop the attached surface, if any. Idempotent.
    pub fn dispose(&mut self) {
        if self.is_attached() {
            debug!("editing surface disposed");
        }
        self.attachment = Attachment::Detached;
    }

    /// The attached surface.
    ///
    /// # Errors
    /// Returns [`AdapterError::Detached`] when no surface is attached.
    pub fn surface(&self) -> Result<&F::Surface, AdapterError> {
        match &self.attachment {
            Attachment::Attached(surface) => Ok(surface),
            Attachment::Detached => Err(AdapterError::Detached),
        }
    }

    /// The attached surface, mutably.
    ///
    /// # Errors
    /// Returns [`AdapterError::Detached`] when no surface is attached.
    pub fn surface_mut(&mut self) -> Result<&mut F::Surface, AdapterError> {
        match &mut self.attachment {
            Attachment::Attached(surface) => Ok(surface),
            Attachment::Detached => Err(AdapterError::Detached),
        }
    }

    /// The full document, serialized.
    ///
    /// # Errors
    /// Returns [`AdapterError::Detached`] when no surface is attached.
    pub fn content(&self) -> Result<String, AdapterError> {
        let surface = self.surface()?;
        Ok(serde_json::to_string(&surface.contents())?)
    }

    /// The document suffix starting at `index`, serialized.
    ///
    /// # Errors
    /// Returns [`AdapterError::Detached`] when no surface is attached.
    pub fn content_from(&self, index: usize) -> Result<String, AdapterError> {
        let surface = self.surface()?;
        Ok(serde_json::to_string(&surface.contents_from(index))?)
    }

    /// The document slice `[index, index + length)`, serialized.
    ///
    /// # Errors
    /// Returns [`AdapterError::Detached`] when no surface is attached.
    pub fn content_range(&self, index: usize, length: usize) -> Result<String, AdapterError> {
        let surface = self.surface()?;
        Ok(serde_json::to_string(&surface.contents_in_range(index, length))?)
    }
}

impl<F: SurfaceFactory> Drop for EditorAdapter<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{HeadlessHost, HeadlessSurface};

    fn adapter() -> EditorAdapter<HeadlessHost> {
        let mount: MountTarget = "#editor".parse().unwrap();
        EditorAdapter::new(HeadlessHost::with_mount(mount.clone()), mount)
    }

    // --- Attachment state ---

    #[test]
    fn test_queries_fail_before_spawn() {
        let adapter = adapter();
        assert!(!adapter.is_attached());
        assert!(matches!(adapter.content(), Err(AdapterError::Detached)));
        assert!(matches!(
            adapter.content_from(0),
            Err(AdapterError::Detached)
        ));
        assert!(matches!(
            adapter.content_range(0, 1),
            Err(AdapterError::Detached)
        ));
    }

    #[test]
    fn test_spawn_attaches_surface() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        assert!(adapter.is_attached());
    }

    #[test]
    fn test_spawn_at_unknown_mount_fails_and_stays_detached() {
        let mut adapter = adapter();
        let other: MountTarget = "#missing".parse().unwrap();
        let result = adapter.spawn_at(&other, SpawnConfig::default());
        assert!(matches!(result, Err(SpawnError::UnknownMount(_))));
        assert!(!adapter.is_attached());
    }

    #[test]
    fn test_dispose_detaches_and_is_idempotent() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        adapter.dispose();
        assert!(!adapter.is_attached());
        adapter.dispose();
        assert!(matches!(adapter.content(), Err(AdapterError::Detached)));
    }

    // --- Content queries ---

    #[test]
    fn test_content_serializes_full_document() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        assert_eq!(adapter.content().unwrap(), r#"{"ops":[{"insert":"\n"}]}"#);
    }

    #[test]
    fn test_content_matches_surface_serialization() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        adapter.surface_mut().unwrap().insert_text(0, "hello", None);
        let expected =
            serde_json::to_string(&adapter.surface().unwrap().contents()).unwrap();
        assert_eq!(adapter.content().unwrap(), expected);
    }

    #[test]
    fn test_content_range_is_untransformed_slice() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        adapter
            .surface_mut()
            .unwrap()
            .insert_text(0, "hello world", None);
        let expected = serde_json::to_string(
            &adapter.surface().unwrap().contents_in_range(6, 5),
        )
        .unwrap();
        assert_eq!(adapter.content_range(6, 5).unwrap(), expected);
        assert_eq!(
            adapter.content_range(6, 5).unwrap(),
            r#"{"ops":[{"insert":"world"}]}"#
        );
    }

    #[test]
    fn test_content_from_equals_suffix_range() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        adapter
            .surface_mut()
            .unwrap()
            .insert_text(0, "hello world", None);
        let len = adapter.surface().unwrap().len();
        assert_eq!(
            adapter.content_from(6).unwrap(),
            adapter.content_range(6, len - 6).unwrap()
        );
    }

    // --- Re-spawn ---

    #[test]
    fn test_respawn_replaces_surface() {
        let mount_a: MountTarget = "#a".parse().unwrap();
        let mount_b: MountTarget = "#b".parse().unwrap();
        let mut host = HeadlessHost::new();
        host.register(mount_a.clone());
        host.register(mount_b.clone());
        let mut adapter = EditorAdapter::new(host, mount_a);

        adapter.spawn(SpawnConfig::default()).unwrap();
        adapter.surface_mut().unwrap().insert_text(0, "first", None);

        adapter.spawn_at(&mount_b, SpawnConfig::default()).unwrap();
        let surface: &HeadlessSurface = adapter.surface().unwrap();
        assert_eq!(surface.mount().as_str(), "#b");
        assert_eq!(adapter.content().unwrap(), r#"{"ops":[{"insert":"\n"}]}"#);
    }

    #[test]
    fn test_failed_respawn_leaves_adapter_detached() {
        let mut adapter = adapter();
        adapter.spawn(SpawnConfig::default()).unwrap();
        let missing: MountTarget = "#missing".parse().unwrap();
        assert!(adapter.spawn_at(&missing, SpawnConfig::default()).is_err());
        assert!(!adapter.is_attached());
    }
}
