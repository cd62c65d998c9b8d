// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The ordered asset list.
//
// Every operation is a value transform: it consumes the list and returns
// the new one, so callers never observe in-place aliasing. Out-of-range
// indices from UI-driven calls are swallowed here as logged no-ops; the
// list never panics on a bad index.

use bindery_core::error::BinderyError;
use bindery_core::{DocumentRequest, ImageAsset, Movement};
use tracing::debug;

/// Ordered collection of image assets; list order is page order.
#[derive(Debug, Clone, Default)]
pub struct AssetList {
    assets: Vec<ImageAsset>,
}

impl AssetList {
    pub fn new() -> Self {
        Self { assets: Vec::new() }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageAsset> {
        self.assets.get(index)
    }

    pub fn assets(&self) -> &[ImageAsset] {
        &self.assets
    }

    // -- Transforms (consume self, return the new list) -----------------------

    /// Append newly accepted assets at the end, preserving input order.
    ///
    /// Assets with unrecognized formats are appended like any other; format
    /// policy is applied at assembly time, not here.
    pub fn append(mut self, new_assets: Vec<ImageAsset>) -> Self {
        debug!(count = new_assets.len(), "appending assets");
        self.assets.extend(new_assets);
        self
    }

    /// Remove the asset at `index`. Out of range is a no-op.
    pub fn remove(mut self, index: usize) -> Self {
        match self.bounds_check(index) {
            Ok(()) => {
                let removed = self.assets.remove(index);
                debug!(index, id = %removed.id, "asset removed");
            }
            Err(err) => debug!(%err, "remove ignored"),
        }
        self
    }

    /// Replace the caption of the asset at `index`. Out of range is a no-op.
    pub fn set_caption(mut self, index: usize, caption: impl Into<String>) -> Self {
        match self.bounds_check(index) {
            Ok(()) => self.assets[index].caption = caption.into(),
            Err(err) => debug!(%err, "caption edit ignored"),
        }
        self
    }

    /// Relocate the asset at `index` according to `movement`.
    ///
    /// Relocation is remove-then-insert: the moved element is taken out and
    /// re-inserted at the target position, so every other element keeps its
    /// relative order. For UP/DOWN the target is adjacent and the operation
    /// degenerates to a neighbour transposition; TOP/BOTTOM shift the whole
    /// intervening run by one. Out of range is a no-op, as are UP at the
    /// front and DOWN at the back.
    pub fn reorder(mut self, index: usize, movement: Movement) -> Self {
        if let Err(err) = self.bounds_check(index) {
            debug!(%err, "reorder ignored");
            return self;
        }

        let last = self.assets.len() - 1;
        let target = match movement {
            Movement::Top => 0,
            Movement::Up => index.saturating_sub(1),
            Movement::Down => (index + 1).min(last),
            Movement::Bottom => last,
        };

        if target != index {
            let asset = self.assets.remove(index);
            self.assets.insert(target, asset);
            debug!(from = index, to = target, ?movement, "asset relocated");
        }
        self
    }

    // -- Snapshot -------------------------------------------------------------

    /// Produce the immutable request snapshot handed to the assembler.
    ///
    /// The snapshot owns deep copies; mutating this list afterwards cannot
    /// affect an assembly already in flight.
    pub fn snapshot(&self, title: &str, author: &str) -> DocumentRequest {
        DocumentRequest::new(title, author, self.assets.clone())
    }

    fn bounds_check(&self, index: usize) -> Result<(), BinderyError> {
        if index < self.assets.len() {
            Ok(())
        } else {
            Err(BinderyError::IndexOutOfRange {
                index,
                len: self.assets.len(),
            })
        }
    }
}
