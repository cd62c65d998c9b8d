// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bindery-document — Document assembly for Bindery.
//
// Builds paginated PDF artifacts from ordered image albums (title page,
// one captioned page per image, scale-to-fit placement) and provides an
// inspector for reading produced artifacts back.

pub mod assembler;
pub mod inspect;
pub mod layout;

pub use assembler::DocumentAssembler;
pub use inspect::ArtifactInspector;
pub use layout::{PageGeometry, PlacedImage};
