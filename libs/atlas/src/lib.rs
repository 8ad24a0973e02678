//! The `atlas` crate converts rasterized fonts into per-glyph pixel atlases.
//!
//! # Capabilities
//!
//! ## Renderer independent
//!
//! Glyphs are extracted through the [`Rasterizer`][r] interface onto a one bit per pixel
//! [`Canvas`][c], so any font technology that can draw a line of text without anti-aliasing can
//! feed the pipeline.
//!
//! ## Shared coordinate space
//!
//! Every glyph of a font is left-packed against its own ink but shares the font-wide top of ink,
//! so glyphs stay aligned to a common baseline when they are stamped next to each other.
//!
//! ## Table output
//!
//! The resulting [`FontAtlas`][fa] is serialized into an ordered nested-table grammar that a
//! scripting runtime can load directly, and can be parsed back from that grammar.
//!
//! ## Works in `no_std` environments
//!
//! Only `alloc` is required. The `std` feature adds helpers for dumping into [`std::io::Write`]
//! implementations.
//!
//! [r]: extract::Rasterizer
//! [c]: canvas::Canvas
//! [fa]: glyph::FontAtlas

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod bounds;
pub mod canvas;
pub mod extract;
pub mod font;
pub mod glyph;
pub mod preview;
pub mod table;
