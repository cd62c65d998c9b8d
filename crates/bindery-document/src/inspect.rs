// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Artifact inspector — read produced PDFs back using the `lopdf` crate.

use bindery_core::error::{BinderyError, Result};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument};

/// Reads a serialized artifact for verification.
///
/// Wraps `lopdf::Document` and exposes the small inspection surface the
/// embedding layer (and the test suite) needs: page count and per-page
/// media box dimensions.
pub struct ArtifactInspector {
    document: Document,
}

impl ArtifactInspector {
    /// Parse an artifact from its serialized bytes.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| BinderyError::PdfError(format!("failed to parse artifact: {err}")))?;

        debug!(pages = document.get_pages().len(), "artifact parsed");
        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height of a page (1-indexed) in points, from its media
    /// box. Falls back to the page-tree parent when the page dictionary
    /// does not carry its own /MediaBox.
    pub fn page_size(&self, page_number: u32) -> Result<(f32, f32)> {
        let pages = self.document.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            BinderyError::PdfError(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })?;

        let media_box = self.media_box_of(page_id).ok_or_else(|| {
            BinderyError::PdfError(format!("page {page_number} has no resolvable /MediaBox"))
        })?;

        if media_box.len() != 4 {
            return Err(BinderyError::PdfError(format!(
                "malformed /MediaBox on page {page_number}: {media_box:?}"
            )));
        }

        Ok((
            (media_box[2] - media_box[0]).abs(),
            (media_box[3] - media_box[1]).abs(),
        ))
    }

    /// Resolve /MediaBox for a page dictionary, following /Parent up the
    /// page tree when the entry is inherited.
    fn media_box_of(&self, id: ObjectId) -> Option<Vec<f32>> {
        let dict = self.document.get_object(id).ok()?.as_dict().ok()?;
        match dict.get(b"MediaBox") {
            Ok(entry) => self.box_numbers(entry),
            Err(_) => match dict.get(b"Parent").ok()? {
                Object::Reference(parent_id) => self.media_box_of(*parent_id),
                _ => None,
            },
        }
    }

    /// Read a /MediaBox entry (possibly an indirect reference) as numbers.
    fn box_numbers(&self, entry: &Object) -> Option<Vec<f32>> {
        let entry = match entry {
            Object::Reference(id) => self.document.get_object(*id).ok()?,
            other => other,
        };
        entry
            .as_array()
            .ok()?
            .iter()
            .map(number)
            .collect::<Option<Vec<f32>>>()
    }
}

fn number(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg};

    /// A minimal one-page PDF serialized in memory.
    fn one_page_pdf() -> Vec<u8> {
        let mut doc = PdfDocument::new("inspect-fixture");
        doc.with_pages(vec![PdfPage::new(Mm(216.0), Mm(279.0), Vec::new())]);
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        doc.save(&PdfSaveOptions::default(), &mut warnings)
    }

    #[test]
    fn counts_pages() {
        let inspector = ArtifactInspector::from_bytes(&one_page_pdf()).expect("parse");
        assert_eq!(inspector.page_count(), 1);
    }

    #[test]
    fn reads_page_dimensions() {
        let inspector = ArtifactInspector::from_bytes(&one_page_pdf()).expect("parse");
        let (width, height) = inspector.page_size(1).expect("page size");
        assert!((width - 612.28).abs() < 1.0);
        assert!((height - 790.87).abs() < 1.0);
    }

    #[test]
    fn out_of_range_page_is_an_error() {
        let inspector = ArtifactInspector::from_bytes(&one_page_pdf()).expect("parse");
        assert!(inspector.page_size(2).is_err());
    }

    #[test]
    fn garbage_bytes_are_rejected() {
        assert!(ArtifactInspector::from_bytes(b"not a pdf").is_err());
    }
}
