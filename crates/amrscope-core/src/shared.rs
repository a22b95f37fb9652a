//! Shared catalog handle for interactive use.
//!
//! One producer mutates the catalog through [`SharedCatalog::with_catalog_mut`];
//! any number of frames encode through [`SharedCatalog::encode_snapshot`], which
//! holds the read lock for the whole encode so each field reflects a single
//! catalog state.

use std::sync::{Arc, RwLock};

use crate::catalog::BlockCatalog;
use crate::encoder::{encode, FlatField};
use crate::error::{AmrError, Result};

/// Clonable, thread-safe handle to a [`BlockCatalog`].
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<BlockCatalog>>,
}

impl SharedCatalog {
    /// Wraps an existing catalog.
    pub fn new(catalog: BlockCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Access the catalog for reading.
    pub fn with_catalog<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&BlockCatalog) -> R,
    {
        let guard = self.inner.read().map_err(|_| AmrError::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Access the catalog for writing.
    pub fn with_catalog_mut<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut BlockCatalog) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| AmrError::LockPoisoned)?;
        Ok(f(&mut guard))
    }

    /// Encodes the current catalog state.
    pub fn encode_snapshot(&self) -> Result<FlatField> {
        self.with_catalog(encode)?
    }
}
