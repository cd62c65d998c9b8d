// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Assembly configuration.

use serde::{Deserialize, Serialize};

/// Settings for one document assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Page size for every page of the document. Resolved into a fixed
    /// geometry once at the start of assembly and reused for all pages.
    pub paper_size: crate::PaperSize,
    /// What to do with an asset whose format is not recognized: `false`
    /// stops the image loop there (no later image is rendered), `true`
    /// skips the asset and continues with the rest.
    pub continue_on_unsupported: bool,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            paper_size: crate::PaperSize::Letter,
            continue_on_unsupported: false,
        }
    }
}
