// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session layer — ties the album, the assembler, and the artifact
// lifecycle together for an embedding application.
//
// One session holds one album and at most one current artifact. Assembly
// takes `&mut self`, so the borrow checker rules out list edits while an
// assembly is in flight; the snapshot taken at invocation time isolates
// the assembler from any edits that follow.

use bindery_core::error::{BinderyError, Result};
use bindery_core::{Artifact, ArtifactHandle, AssemblyConfig, ImageAsset};
use bindery_document::DocumentAssembler;
use tracing::{info, instrument};

use crate::intake::{self, IncomingFile};
use crate::list::AssetList;

/// A bundling session: title/author metadata, the ordered album, and the
/// current artifact.
pub struct AlbumSession {
    title: String,
    author: String,
    list: AssetList,
    assembler: DocumentAssembler,
    current: Option<Artifact>,
}

impl AlbumSession {
    pub fn new(config: AssemblyConfig) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            list: AssetList::new(),
            assembler: DocumentAssembler::new(config),
            current: None,
        }
    }

    // -- Metadata -------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    // -- Album edits ----------------------------------------------------------

    /// Accept files from the file-selection collaborator and append them.
    pub fn add_files(&mut self, files: Vec<IncomingFile>) {
        let assets = intake::accept_files(files);
        self.list = std::mem::take(&mut self.list).append(assets);
    }

    pub fn remove_image(&mut self, index: usize) {
        self.list = std::mem::take(&mut self.list).remove(index);
    }

    pub fn set_caption(&mut self, index: usize, caption: impl Into<String>) {
        self.list = std::mem::take(&mut self.list).set_caption(index, caption);
    }

    pub fn move_image(&mut self, index: usize, movement: bindery_core::Movement) {
        self.list = std::mem::take(&mut self.list).reorder(index, movement);
    }

    pub fn assets(&self) -> &[ImageAsset] {
        self.list.assets()
    }

    // -- Assembly -------------------------------------------------------------

    /// Whether the assembly trigger should be enabled.
    ///
    /// An empty album is refused at this boundary rather than letting the
    /// assembler emit a title-only document.
    pub fn can_assemble(&self) -> bool {
        !self.list.is_empty()
    }

    /// Snapshot the album and assemble it into a fresh artifact.
    ///
    /// On success the previous artifact (if any) is released and its handle
    /// goes stale; the returned handle is the only live one.
    #[instrument(skip(self), fields(images = self.list.len()))]
    pub async fn make_document(&mut self) -> Result<ArtifactHandle> {
        if self.list.is_empty() {
            return Err(BinderyError::EmptyAssetList);
        }

        let request = self.list.snapshot(&self.title, &self.author);
        let artifact = self.assembler.assemble(&request).await?;
        let handle = artifact.handle;

        if let Some(previous) = self.current.replace(artifact) {
            info!(stale = %previous.handle, fresh = %handle, "previous artifact superseded");
        }
        Ok(handle)
    }

    // -- Artifact access ------------------------------------------------------

    pub fn current_artifact(&self) -> Option<&Artifact> {
        self.current.as_ref()
    }

    /// Dereference a handle for the open/download collaborator.
    pub fn resolve_artifact(&self, handle: ArtifactHandle) -> Result<&Artifact> {
        match &self.current {
            Some(artifact) if artifact.handle == handle => Ok(artifact),
            _ => Err(BinderyError::StaleArtifact(handle)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_core::Movement;
    use bindery_document::ArtifactInspector;

    fn encoded_fixture(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([20, 160, 90]));
        let mut cursor = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut cursor, format)
            .expect("encode fixture");
        cursor.into_inner()
    }

    fn png_file(name: &str) -> IncomingFile {
        IncomingFile {
            bytes: encoded_fixture(48, 24, image::ImageFormat::Png),
            mime_type: "image/png".into(),
            file_name: name.into(),
        }
    }

    fn jpeg_file(name: &str) -> IncomingFile {
        IncomingFile {
            bytes: encoded_fixture(24, 48, image::ImageFormat::Jpeg),
            mime_type: "image/jpeg".into(),
            file_name: name.into(),
        }
    }

    #[tokio::test]
    async fn empty_album_refuses_assembly() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        assert!(!session.can_assemble());

        let err = session.make_document().await.expect_err("must refuse");
        assert!(matches!(err, BinderyError::EmptyAssetList));
        assert!(session.current_artifact().is_none());
    }

    #[tokio::test]
    async fn full_session_produces_an_inspectable_artifact() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        session.set_title("Coast Walk");
        session.set_author("R. Holt");
        session.add_files(vec![png_file("beach.png"), jpeg_file("cliff.jpg")]);
        assert!(session.can_assemble());

        let handle = session.make_document().await.expect("assemble");
        let artifact = session.resolve_artifact(handle).expect("resolve");

        assert_eq!(artifact.page_count, 3);
        let inspector = ArtifactInspector::from_bytes(&artifact.bytes).expect("inspect");
        assert_eq!(inspector.page_count(), 3);
    }

    #[tokio::test]
    async fn new_assembly_supersedes_the_previous_handle() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        session.add_files(vec![png_file("beach.png")]);

        let first = session.make_document().await.expect("first");
        session.add_files(vec![jpeg_file("cliff.jpg")]);
        let second = session.make_document().await.expect("second");

        assert_ne!(first, second);
        assert!(matches!(
            session.resolve_artifact(first),
            Err(BinderyError::StaleArtifact(_))
        ));
        assert_eq!(session.resolve_artifact(second).expect("live").page_count, 3);
    }

    #[tokio::test]
    async fn unrecognized_format_truncates_the_album_document() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        session.add_files(vec![
            png_file("beach.png"),
            IncomingFile {
                bytes: vec![0u8; 8],
                mime_type: "image/webp".into(),
                file_name: "clip.webp".into(),
            },
            jpeg_file("cliff.jpg"),
        ]);

        let handle = session.make_document().await.expect("assemble");
        // Title + the PNG; the JPEG after the unrecognized asset is dropped.
        assert_eq!(session.resolve_artifact(handle).expect("resolve").page_count, 2);
    }

    #[tokio::test]
    async fn failed_assembly_keeps_the_previous_artifact_live() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        session.add_files(vec![png_file("beach.png")]);
        let handle = session.make_document().await.expect("first");

        // Corrupt bytes under a recognized label abort the next assembly.
        session.add_files(vec![IncomingFile {
            bytes: vec![0xba, 0xad],
            mime_type: "image/png".into(),
            file_name: "broken.png".into(),
        }]);
        let err = session.make_document().await.expect_err("must fail");
        assert!(matches!(err, BinderyError::AssetDecodeFailed { index: 1, .. }));

        // No partial artifact was published; the old handle still resolves.
        assert!(session.resolve_artifact(handle).is_ok());
    }

    #[tokio::test]
    async fn album_edits_shape_the_document() {
        let mut session = AlbumSession::new(AssemblyConfig::default());
        session.add_files(vec![png_file("a.png"), jpeg_file("b.jpg"), png_file("c.png")]);

        session.move_image(2, Movement::Top);
        session.remove_image(1);
        session.set_caption(0, "front matter");

        let order: Vec<&str> = session.assets().iter().map(|a| a.caption.as_str()).collect();
        assert_eq!(order, ["front matter", "b.jpg"]);

        let handle = session.make_document().await.expect("assemble");
        assert_eq!(session.resolve_artifact(handle).expect("resolve").page_count, 3);
    }
}
