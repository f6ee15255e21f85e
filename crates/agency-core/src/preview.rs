// ── Upload previews ──
//
// A selected file gets an opaque `preview:<uuid>` handle registered in a
// `PreviewRegistry`. `Preview` releases its handle on drop; `PreviewSlot`
// holds at most one, so replacing the file or tearing the slot down frees
// the previous handle. The registry lists live handles, which makes leaks
// visible.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(Uuid);

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview:{}", self.0)
    }
}

/// Tracks every live preview handle.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<PreviewHandle>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a preview for a local file.
    pub fn acquire(&self, path: &Path) -> Result<Preview, CoreError> {
        let meta = std::fs::metadata(path).map_err(|e| CoreError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        if !meta.is_file() {
            return Err(CoreError::File {
                path: path.to_path_buf(),
                reason: "not a regular file".into(),
            });
        }

        let handle = PreviewHandle(Uuid::new_v4());
        self.lock().insert(handle);
        debug!(%handle, path = %path.display(), "preview acquired");

        Ok(Preview {
            handle,
            path: path.to_path_buf(),
            size: meta.len(),
            media_type: agency_api::multipart::media_type_for(path),
            registry: self.clone(),
        })
    }

    pub fn live(&self) -> Vec<PreviewHandle> {
        self.lock().iter().copied().collect()
    }

    pub fn live_count(&self) -> usize {
        self.lock().len()
    }

    pub fn is_live(&self, handle: PreviewHandle) -> bool {
        self.lock().contains(&handle)
    }

    fn release(&self, handle: PreviewHandle) {
        if self.lock().remove(&handle) {
            debug!(%handle, "preview released");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<PreviewHandle>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A live preview of a selected file. Released on drop.
#[derive(Debug)]
pub struct Preview {
    handle: PreviewHandle,
    path: PathBuf,
    size: u64,
    media_type: &'static str,
    registry: PreviewRegistry,
}

impl Preview {
    pub fn handle(&self) -> PreviewHandle {
        self.handle
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.registry.release(self.handle);
    }
}

/// Holds the preview for one file input.
#[derive(Debug)]
pub struct PreviewSlot {
    registry: PreviewRegistry,
    current: Option<Preview>,
}

impl PreviewSlot {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    /// Select a new file. The previous preview is released once the new
    /// one is acquired; on error the previous one stays.
    pub fn select(&mut self, path: &Path) -> Result<&Preview, CoreError> {
        let preview = self.registry.acquire(path)?;
        Ok(self.current.insert(preview))
    }

    /// Clear the input, releasing any preview.
    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Preview> {
        self.current.as_ref()
    }

    /// Path of the selected file, for the upload.
    pub fn path(&self) -> Option<&Path> {
        self.current.as_ref().map(Preview::path)
    }
}
