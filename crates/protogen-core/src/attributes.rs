//! Permissioned key-value metadata shared between an app and its host.
//!
//! Every attribute carries an [`AccessLevel`] that gates the external
//! [`AttributeStore::get`] and [`AttributeStore::set`] paths. The
//! administrative [`AttributeStore::admin_set`] bypasses the checks and is the
//! only way to change an attribute's access level.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Keys every app publishes at construction.
pub mod keys {
    /// Unique identifier of the app build.
    pub const ID: &str = "id";
    /// Human-readable app name.
    pub const NAME: &str = "name";
    /// Short description.
    pub const DESCRIPTION: &str = "description";
    /// Path of the thumbnail image.
    pub const THUMBNAIL: &str = "thumbnail";
    /// Path of the main web page.
    pub const MAIN_PAGE: &str = "main_page";
    /// URL of the home/info page.
    pub const HOME_PAGE: &str = "home_page";
}

/// Who may read or write an attribute through the external interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AccessLevel {
    /// Readable, not writable.
    Read,
    /// Readable and writable.
    ReadWrite,
    /// Writable, not readable.
    Write,
}

impl AccessLevel {
    /// Whether the external getter may return the value.
    #[must_use]
    pub fn can_read(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    /// Whether the external setter may replace the value.
    #[must_use]
    pub fn can_write(self) -> bool {
        matches!(self, Self::ReadWrite | Self::Write)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::ReadWrite => write!(f, "read-write"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// A single stored attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Key, unique within a store.
    pub id: String,
    /// Current value.
    pub value: String,
    /// Current access level.
    pub access: AccessLevel,
}

/// Errors from the external attribute interface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// No attribute with this id exists.
    #[error("attribute not found: {id}")]
    NotFound {
        /// The requested id.
        id: String,
    },

    /// The attribute exists but its access level forbids the operation.
    #[error("permission denied for attribute {id} (access: {access})")]
    PermissionDenied {
        /// The requested id.
        id: String,
        /// The attribute's access level at call time.
        access: AccessLevel,
    },
}

/// Result type for attribute operations.
pub type AttributeResult<T> = Result<T, AttributeError>;

/// Thread-safe attribute storage.
///
/// Cloning yields another handle to the same mapping, so the web worker and
/// the app observe each other's writes.
#[derive(Clone, Default)]
pub struct AttributeStore {
    inner: Arc<RwLock<HashMap<String, Attribute>>>,
}

impl fmt::Debug for AttributeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read_guard();
        let mut ids: Vec<&String> = guard.keys().collect();
        ids.sort();
        f.debug_struct("AttributeStore")
            .field("count", &ids.len())
            .field("ids", &ids)
            .finish()
    }
}

impl AttributeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a half-written attribute,
    // so a poisoned lock is still safe to use.
    fn read_guard(&self) -> RwLockReadGuard<'_, HashMap<String, Attribute>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, HashMap<String, Attribute>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create or overwrite an attribute, including its access level.
    ///
    /// This is the administrative path and never fails.
    pub fn admin_set(&self, id: impl Into<String>, value: impl Into<String>, access: AccessLevel) {
        let id = id.into();
        let attribute = Attribute {
            id: id.clone(),
            value: value.into(),
            access,
        };
        debug!(id = %id, access = %access, "Attribute set administratively");
        self.write_guard().insert(id, attribute);
    }

    /// Replace the value of an existing, writable attribute.
    ///
    /// The access level is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if the attribute does not exist and
    /// [`AttributeError::PermissionDenied`] if it is not writable. The stored
    /// value is unchanged on failure.
    pub fn set(&self, id: &str, value: impl Into<String>) -> AttributeResult<()> {
        let mut guard = self.write_guard();
        let attribute = guard.get_mut(id).ok_or_else(|| AttributeError::NotFound {
            id: id.to_string(),
        })?;
        if !attribute.access.can_write() {
            return Err(AttributeError::PermissionDenied {
                id: id.to_string(),
                access: attribute.access,
            });
        }
        attribute.value = value.into();
        debug!(id = %id, "Attribute updated");
        Ok(())
    }

    /// Read the value of an existing, readable attribute.
    ///
    /// # Errors
    ///
    /// Returns [`AttributeError::NotFound`] if the attribute does not exist and
    /// [`AttributeError::PermissionDenied`] if it is not readable.
    pub fn get(&self, id: &str) -> AttributeResult<String> {
        let guard = self.read_guard();
        let attribute = guard.get(id).ok_or_else(|| AttributeError::NotFound {
            id: id.to_string(),
        })?;
        if !attribute.access.can_read() {
            return Err(AttributeError::PermissionDenied {
                id: id.to_string(),
                access: attribute.access,
            });
        }
        Ok(attribute.value.clone())
    }

    /// The current access level of an attribute, if it exists.
    #[must_use]
    pub fn access(&self, id: &str) -> Option<AccessLevel> {
        self.read_guard().get(id).map(|a| a.access)
    }

    /// Snapshot of every readable attribute, keyed by id.
    #[must_use]
    pub fn readable(&self) -> BTreeMap<String, String> {
        self.read_guard()
            .values()
            .filter(|a| a.access.can_read())
            .map(|a| (a.id.clone(), a.value.clone()))
            .collect()
    }

    /// Whether an attribute with this id exists, regardless of access.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.read_guard().contains_key(id)
    }

    /// Number of stored attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    /// Whether the store holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }
}
