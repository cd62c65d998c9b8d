// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bindery.

use thiserror::Error;

use crate::types::ArtifactHandle;

/// Top-level error type for all Bindery operations.
#[derive(Debug, Error)]
pub enum BinderyError {
    // -- Album errors --
    #[error("index {index} out of range for album of {len} assets")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot assemble a document from an empty album")]
    EmptyAssetList,

    // -- Assembly errors --
    #[error("image at index {index} could not be decoded: {detail}")]
    AssetDecodeFailed { index: usize, detail: String },

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Artifact lifecycle --
    #[error("artifact handle {0} is stale or unknown")]
    StaleArtifact(ArtifactHandle),

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BinderyError>;
