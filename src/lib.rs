//! Anatomical body diagrams with highlighted regions.
//!
//! A [`CatalogSet`] holds the outline of every body region for each gender and side.  A [`Body`]
//! merges a caller's sparse list of [`ActiveRegion`]s into the selected [`Catalog`], colouring
//! highlighted regions from a [`Palette`] by intensity and leaving the rest neutral, then emits
//! one shape per outline.  The result can be drawn by any [`image::Backend`].

use vector2d::Vector2D;

mod body;
pub mod catalog;
mod error;
pub mod image;
pub mod merge;
pub mod palette;
mod slug;

pub use body::{emit_shapes, Body, BodyOpts, PressHandler, RenderedBody, Shape};
pub use catalog::{Catalog, CatalogEntry, CatalogSet, Gender, Side, ViewBox};
pub use error::{Error, Result};
pub use merge::{merge, ActiveRegion, MergedEntry};
pub use palette::{resolve_color, Color, Palette};
pub use slug::{Slug, SlugStyle};

/// Type alias for 2D floating point vectors (in the geometric sense, unlike [`Vec`])
pub type V2 = Vector2D<f32>;
