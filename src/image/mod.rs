//! Drawing primitives.  A render pass produces an [`Image`], an intermediate representation made
//! of one drawing surface, one styled group and a flat list of filled paths.  An [`Image`] can
//! then be handed to any [`Backend`]: markup (SVG) for browser-style hosts, or a native raster
//! backend for everything else.

mod backend;
#[cfg(feature = "native")]
pub mod raster;
pub mod svg;

use serde::{Deserialize, Serialize};

use crate::{Color, Slug, ViewBox, V2};

pub use backend::{active, init, resolve, Backend, BackendKind, Drawing};

/// A full drawing: a surface containing one group of paths, drawn in order
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub surface: Surface,
    pub group: GroupStyle,
    pub paths: Vec<PathElem>,
}

/// The rectangular area that an [`Image`] is drawn onto
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// The window into path coordinate space
    pub view_box: ViewBox,
    /// Output dimensions (in pixels, or CSS px for markup)
    pub size: V2,
}

impl Surface {
    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// Styling shared by every path in an [`Image`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupStyle {
    pub stroke_width: f32,
    /// Fill used by paths which don't specify their own.  `None` means `fill="none"`.
    pub fill: Option<Color>,
    /// Outline colour.  `None` leaves paths unstroked.
    pub stroke: Option<Color>,
    pub line_cap: LineCap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// A single filled outline.  Regions with several outlines produce several `PathElem`s.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElem {
    /// Path descriptor, in SVG path syntax
    pub d: String,
    pub fill: Color,
    /// The region this outline belongs to
    pub id: Slug,
    /// Whether a press handler is listening for this path
    pub pressable: bool,
}
