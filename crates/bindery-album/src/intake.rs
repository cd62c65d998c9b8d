// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File intake boundary.
//
// The file-selection collaborator hands over (bytes, MIME type, filename)
// triples; each becomes one asset with the filename as its initial caption.
// Unrecognized MIME types are accepted here and left to the assembler's
// format policy.

use bindery_core::ImageAsset;
use tracing::{debug, warn};

/// One file as delivered by the external file-selection collaborator.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_name: String,
}

/// Convert an intake batch into assets, preserving order.
pub fn accept_files(files: Vec<IncomingFile>) -> Vec<ImageAsset> {
    files
        .into_iter()
        .map(|file| {
            let asset = ImageAsset::from_upload(file.bytes, file.mime_type, file.file_name);
            if asset.format.is_none() {
                warn!(id = %asset.id, mime = %asset.declared_mime, "accepted file with unrecognized format");
            } else {
                debug!(id = %asset.id, mime = %asset.declared_mime, "accepted file");
            }
            asset
        })
        .collect()
}
