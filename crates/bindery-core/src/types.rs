// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bindery album assembler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one image asset in an album.
///
/// Preview handles and caption edits are keyed by this identity, not by
/// list position, so reordering never invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Uuid);

impl AssetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a produced artifact, valid until superseded by the
/// next assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactHandle(pub Uuid);

impl ArtifactHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ArtifactHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ArtifactHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported raster image encodings.
///
/// Anything outside this enum never decodes; an asset whose declared MIME
/// type maps to no variant is carried with `format: None` and handled by
/// the assembler's unsupported-format policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// MIME type string for this encoding.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Map a declared MIME type to a supported encoding.
    ///
    /// Only `image/png` and `image/jpeg` map; everything else is `None`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// One user-supplied picture destined for its own page.
///
/// `content` is immutable once set; only the caption is edited in place.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub id: AssetId,
    /// Raw encoded image bytes as uploaded.
    pub content: Vec<u8>,
    /// Recognized encoding, or `None` when the declared MIME type is not
    /// one we can decode.
    pub format: Option<ImageFormat>,
    /// The MIME type as declared at intake, kept for diagnostics.
    pub declared_mime: String,
    /// Caption drawn above the image on its page.
    pub caption: String,
}

impl ImageAsset {
    /// Build an asset from an intake triple (bytes, MIME type, filename).
    ///
    /// The filename becomes the initial caption. An unrecognized MIME type
    /// still yields an asset — format policy is applied at assembly time,
    /// not here.
    pub fn from_upload(
        content: Vec<u8>,
        declared_mime: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        let declared_mime = declared_mime.into();
        Self {
            id: AssetId::new(),
            format: ImageFormat::from_mime_type(&declared_mime),
            content,
            declared_mime,
            caption: file_name.into(),
        }
    }
}

/// Placeholder used when the request title is empty.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Placeholder used when the request author is empty.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Immutable snapshot handed to the assembler.
///
/// Later mutation of the live asset list must not affect an in-flight
/// assembly, so the request owns deep copies of everything it carries.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub title: String,
    pub author: String,
    /// Page order. May be empty; the session layer decides whether an
    /// empty album is allowed to reach the assembler.
    pub images: Vec<ImageAsset>,
}

impl DocumentRequest {
    /// Snapshot a request, substituting placeholders for blank metadata.
    pub fn new(title: impl Into<String>, author: impl Into<String>, images: Vec<ImageAsset>) -> Self {
        let title = title.into();
        let author = author.into();
        Self {
            title: if title.trim().is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            author: if author.trim().is_empty() {
                DEFAULT_AUTHOR.to_string()
            } else {
                author
            },
            images,
        }
    }
}

/// The produced document: serialized bytes plus an access handle.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Dereferenceable reference for the open/download collaborator.
    pub handle: ArtifactHandle,
    /// The serialized PDF.
    pub bytes: Vec<u8>,
    /// SHA-256 of `bytes`, hex-encoded.
    pub content_hash: String,
    /// Total pages, including the title page.
    pub page_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Artifact {
    /// Write the serialized document to a file.
    pub fn write_to_file(&self, path: impl AsRef<std::path::Path>) -> crate::error::Result<()> {
        std::fs::write(path.as_ref(), &self.bytes)?;
        Ok(())
    }
}

/// Single-element relocation policies for the ordered asset list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    /// Move to position 0.
    Top,
    /// Move one position toward the front; no-op at index 0.
    Up,
    /// Move one position toward the back; no-op at the last index.
    Down,
    /// Move to the last position.
    Bottom,
}

/// Standard paper sizes for album pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_mapping_recognizes_png_and_jpeg_only() {
        assert_eq!(ImageFormat::from_mime_type("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("image/jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime_type("IMAGE/PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_mime_type("image/gif"), None);
        assert_eq!(ImageFormat::from_mime_type("application/pdf"), None);
        assert_eq!(ImageFormat::from_mime_type(""), None);

        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }

    #[test]
    fn upload_filename_becomes_caption() {
        let asset = ImageAsset::from_upload(vec![1, 2, 3], "image/png", "holiday.png");
        assert_eq!(asset.caption, "holiday.png");
        assert_eq!(asset.format, Some(ImageFormat::Png));
        assert_eq!(asset.declared_mime, "image/png");
    }

    #[test]
    fn upload_with_unknown_mime_is_still_an_asset() {
        let asset = ImageAsset::from_upload(vec![0u8; 4], "image/webp", "clip.webp");
        assert!(asset.format.is_none());
        assert_eq!(asset.declared_mime, "image/webp");
    }

    #[test]
    fn blank_request_metadata_gets_placeholders() {
        let request = DocumentRequest::new("", "  ", Vec::new());
        assert_eq!(request.title, DEFAULT_TITLE);
        assert_eq!(request.author, DEFAULT_AUTHOR);

        let named = DocumentRequest::new("Summer 2025", "R. Holt", Vec::new());
        assert_eq!(named.title, "Summer 2025");
        assert_eq!(named.author, "R. Holt");
    }

    #[test]
    fn paper_dimensions() {
        assert_eq!(PaperSize::Letter.dimensions_mm(), (216, 279));
        assert_eq!(PaperSize::A4.dimensions_mm(), (210, 297));
        assert_eq!(
            PaperSize::Custom {
                width_mm: 100,
                height_mm: 50
            }
            .dimensions_mm(),
            (100, 50)
        );
    }
}
