// SPDX-License-Identifier: MPL-2.0

//! Transient preview handles
//!
//! A [`DisplayHandle`] is what the view uses to show a photo. It resolves to
//! the photo bytes through a [`DisplayRegistry`] that only keeps weak
//! references, so revoking a handle never touches the bytes and dropping the
//! bytes never leaves a handle pointing at stale data.

use crate::constants::DISPLAY_HANDLE_SCHEME;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::debug;
use uuid::Uuid;

/// Revocable, display-only reference to photo bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayHandle {
    id: Uuid,
}

impl DisplayHandle {
    /// URL-style form used by the view (`blob:photo-share/<uuid>`)
    pub fn url(&self) -> String {
        format!("{}/{}", DISPLAY_HANDLE_SCHEME, self.id)
    }
}

impl std::fmt::Display for DisplayHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", DISPLAY_HANDLE_SCHEME, self.id)
    }
}

/// Registry of live display handles
///
/// Cheap to clone; clones share the same table.
#[derive(Clone, Default)]
pub struct DisplayRegistry {
    handles: Arc<Mutex<HashMap<Uuid, Weak<[u8]>>>>,
}

impl DisplayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, HashMap<Uuid, Weak<[u8]>>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a fresh handle for the given bytes
    pub fn create(&self, bytes: &Arc<[u8]>) -> DisplayHandle {
        let id = Uuid::new_v4();
        self.table().insert(id, Arc::downgrade(bytes));
        DisplayHandle { id }
    }

    /// Release a handle. Returns `false` if it was already released.
    pub fn revoke(&self, handle: &DisplayHandle) -> bool {
        let removed = self.table().remove(&handle.id).is_some();
        if removed {
            debug!(handle = %handle, "Display handle revoked");
        }
        removed
    }

    /// Bytes behind a live handle
    pub fn resolve(&self, handle: &DisplayHandle) -> Option<Arc<[u8]>> {
        self.table().get(&handle.id).and_then(Weak::upgrade)
    }

    pub fn is_live(&self, handle: &DisplayHandle) -> bool {
        self.table().contains_key(&handle.id)
    }

    /// Number of handles not yet revoked
    pub fn live_count(&self) -> usize {
        self.table().len()
    }
}

impl std::fmt::Debug for DisplayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}
