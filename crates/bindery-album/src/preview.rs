// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Transient preview handles for the presentation layer.
//
// A preview handle is a capability for rendering one asset in a viewer; it
// is keyed by asset identity, never owns asset bytes, and is not part of
// the document model. Nothing here survives the session.

use std::collections::HashMap;

use bindery_core::AssetId;
use tracing::debug;
use uuid::Uuid;

/// Opaque, locally-resolvable reference to an asset preview.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    fn mint() -> Self {
        Self(format!("preview://{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup table from asset identity to its current preview handle.
#[derive(Debug, Default)]
pub struct PreviewRegistry {
    entries: HashMap<AssetId, PreviewHandle>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh handle for an asset, superseding any previous one.
    pub fn mint(&mut self, asset: AssetId) -> PreviewHandle {
        let handle = PreviewHandle::mint();
        if self.entries.insert(asset, handle.clone()).is_some() {
            debug!(%asset, "previous preview handle superseded");
        }
        handle
    }

    /// The current handle for an asset, if one has been minted.
    pub fn handle_for(&self, asset: AssetId) -> Option<&PreviewHandle> {
        self.entries.get(&asset)
    }

    /// Reverse lookup: which asset does a handle refer to?
    ///
    /// Returns `None` for released or superseded handles.
    pub fn resolve(&self, handle: &PreviewHandle) -> Option<AssetId> {
        self.entries
            .iter()
            .find(|(_, candidate)| *candidate == handle)
            .map(|(asset, _)| *asset)
    }

    /// Drop the handle for an asset (e.g. when it is removed from the
    /// album). Returns whether a handle existed.
    pub fn release(&mut self, asset: AssetId) -> bool {
        self.entries.remove(&asset).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mint_and_resolve_round_trip() {
        let mut registry = PreviewRegistry::new();
        let asset = AssetId::new();

        let handle = registry.mint(asset);
        assert_eq!(registry.resolve(&handle), Some(asset));
        assert_eq!(registry.handle_for(asset), Some(&handle));
        assert!(handle.as_str().starts_with("preview://"));
    }

    #[test]
    fn re_minting_supersedes_the_old_handle() {
        let mut registry = PreviewRegistry::new();
        let asset = AssetId::new();

        let old = registry.mint(asset);
        let new = registry.mint(asset);
        assert_ne!(old, new);
        assert_eq!(registry.resolve(&old), None);
        assert_eq!(registry.resolve(&new), Some(asset));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn release_forgets_the_asset() {
        let mut registry = PreviewRegistry::new();
        let asset = AssetId::new();
        let handle = registry.mint(asset);

        assert!(registry.release(asset));
        assert!(!registry.release(asset));
        assert_eq!(registry.resolve(&handle), None);
        assert!(registry.is_empty());
    }
}
