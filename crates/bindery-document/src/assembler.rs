// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler — turn an ordered album snapshot into a PDF artifact
// using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use bindery_core::error::{BinderyError, Result};
use bindery_core::{Artifact, ArtifactHandle, AssemblyConfig, DocumentRequest, ImageFormat};
use chrono::Utc;
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Color, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, Rgb, TextItem, XObject, XObjectId, XObjectTransform,
};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use crate::layout::{self, PageGeometry};

/// Left margin for the title and for image captions.
const TEXT_MARGIN_PT: f32 = 50.0;
/// Left margin for the author line, indented under the title.
const AUTHOR_MARGIN_PT: f32 = 55.0;
/// Baseline offset of the title (and captions) from the top edge.
const TITLE_DROP_PT: f32 = 60.0;
/// Baseline offset of the author line from the top edge.
const AUTHOR_DROP_PT: f32 = 77.0;
const TITLE_SIZE_PT: f32 = 30.0;
const AUTHOR_SIZE_PT: f32 = 15.0;
const CAPTION_SIZE_PT: f32 = 15.0;

/// Assembles album snapshots into serialized PDF artifacts.
///
/// Each call to [`assemble`](Self::assemble) is independent; the assembler
/// holds no mutable state, so concurrent calls cannot interfere with one
/// another. An assembly is not cancellable once started.
pub struct DocumentAssembler {
    config: AssemblyConfig,
}

impl DocumentAssembler {
    /// Create an assembler with the given configuration.
    pub fn new(config: AssemblyConfig) -> Self {
        Self { config }
    }

    /// Create an assembler with default settings (Letter pages, early stop
    /// on the first unrecognized format).
    pub fn letter() -> Self {
        Self::new(AssemblyConfig::default())
    }

    /// Assemble the request into a finished artifact.
    ///
    /// Produces a title page followed by one page per image, in request
    /// order. Images are decoded strictly sequentially; image *i+1* is not
    /// touched until image *i* is decoded and placed, which keeps page
    /// order deterministic. An empty request is valid here and yields a
    /// title-page-only document.
    #[instrument(skip_all, fields(title = %request.title, images = request.images.len()))]
    pub async fn assemble(&self, request: &DocumentRequest) -> Result<Artifact> {
        // Fixed geometry for every page of this document.
        let geometry = PageGeometry::from_paper(self.config.paper_size);
        let (page_w, page_h) = geometry.page_size();

        info!(
            paper = ?self.config.paper_size,
            images = request.images.len(),
            "assembling document"
        );

        let mut doc = PdfDocument::new(&request.title);
        doc.metadata.info.document_title = request.title.clone();
        doc.metadata.info.author = request.author.clone();

        let mut pages: Vec<PdfPage> = Vec::new();

        // -- Title page -------------------------------------------------------
        let mut title_ops: Vec<Op> = vec![Op::SetFillColor { col: accent_color() }];
        title_ops.extend(text_ops(
            &request.title,
            TEXT_MARGIN_PT,
            geometry.height_pt - TITLE_DROP_PT,
            TITLE_SIZE_PT,
        ));
        title_ops.extend(text_ops(
            &request.author,
            AUTHOR_MARGIN_PT,
            geometry.height_pt - AUTHOR_DROP_PT,
            AUTHOR_SIZE_PT,
        ));
        pages.push(PdfPage::new(page_w, page_h, title_ops));

        // -- Image pages ------------------------------------------------------
        for (index, asset) in request.images.iter().enumerate() {
            let Some(format) = asset.format else {
                if self.config.continue_on_unsupported {
                    warn!(index, mime = %asset.declared_mime, "skipping image with unrecognized format");
                    continue;
                }
                warn!(
                    index,
                    mime = %asset.declared_mime,
                    "unrecognized format ends the image loop; remaining images are dropped"
                );
                break;
            };

            let decoded = decode_asset(index, format, asset.content.clone()).await?;
            let placed = layout::place_image(&geometry, decoded.width(), decoded.height());

            // printpdf wants raw RGB8 pixel data.
            let width_px = decoded.width() as usize;
            let height_px = decoded.height() as usize;
            let rgb = decoded.to_rgb8();
            let raw = RawImage {
                pixels: RawImageData::U8(rgb.into_raw()),
                width: width_px,
                height: height_px,
                data_format: RawImageFormat::RGB8,
                tag: Vec::new(),
            };

            // Stable resource names keep repeated saves of the same request
            // byte-identical.
            let image_id = XObjectId(format!("Im{index}"));
            doc.resources
                .xobjects
                .map
                .insert(image_id.clone(), XObject::Image(raw));

            let mut ops: Vec<Op> = vec![Op::SetFillColor { col: accent_color() }];
            ops.extend(text_ops(
                &asset.caption,
                TEXT_MARGIN_PT,
                geometry.height_pt - TITLE_DROP_PT,
                CAPTION_SIZE_PT,
            ));
            ops.push(Op::UseXobject {
                id: image_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(placed.x)),
                    translate_y: Some(Pt(placed.y)),
                    scale_x: Some(placed.scale),
                    scale_y: Some(placed.scale),
                    // At 72 dpi the native size equals the pixel count in pt,
                    // so the layout scale applies unchanged.
                    dpi: Some(72.0),
                    rotate: None,
                },
            });
            pages.push(PdfPage::new(page_w, page_h, ops));

            debug!(
                index,
                width = placed.width,
                height = placed.height,
                scale = placed.scale,
                "image page added"
            );
        }

        doc.with_pages(pages);
        let page_count = doc.pages.len();

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

        let artifact = Artifact {
            handle: ArtifactHandle::new(),
            content_hash: hash_bytes(&bytes),
            page_count,
            created_at: Utc::now(),
            bytes,
        };

        info!(
            handle = %artifact.handle,
            pages = page_count,
            bytes = artifact.bytes.len(),
            "document assembled"
        );

        Ok(artifact)
    }
}

// -- Drawing helpers ----------------------------------------------------------

/// The accent color used for all text in the document.
fn accent_color() -> Color {
    Color::Rgb(Rgb {
        r: 0.0,
        g: 0.53,
        b: 0.71,
        icc_profile: None,
    })
}

/// Ops for one line of Helvetica text with its baseline at (x, y).
fn text_ops(text: &str, x: f32, y: f32, size: f32) -> Vec<Op> {
    vec![
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        },
        Op::SetFontSizeBuiltinFont {
            size: Pt(size),
            font: BuiltinFont::Helvetica,
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: BuiltinFont::Helvetica,
        },
        Op::EndTextSection,
    ]
}

// -- Decoding -----------------------------------------------------------------

/// The `image` crate decoder matching a declared format.
fn decoder_for(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
    }
}

/// Decode one asset off the async thread.
///
/// Decoding is CPU-bound, so it runs under `spawn_blocking`; this is the
/// per-image suspension point of an assembly. A failure names the offending
/// index so the caller can surface it.
async fn decode_asset(index: usize, format: ImageFormat, content: Vec<u8>) -> Result<DynamicImage> {
    let decoder = decoder_for(format);
    let decoded =
        tokio::task::spawn_blocking(move || image::load_from_memory_with_format(&content, decoder))
            .await
            .map_err(|err| BinderyError::AssetDecodeFailed {
                index,
                detail: format!("decode task aborted: {err}"),
            })?
            .map_err(|err| BinderyError::AssetDecodeFailed {
                index,
                detail: err.to_string(),
            })?;

    debug!(
        index,
        width = decoded.width(),
        height = decoded.height(),
        "image decoded"
    );
    Ok(decoded)
}

/// Hex-encoded SHA-256 digest of the serialized document.
fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
