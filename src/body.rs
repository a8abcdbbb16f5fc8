//! The body diagram itself: resolves options, merges highlights into the selected catalog and
//! emits one drawable shape per outline.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::{
    catalog,
    image::{Backend, Drawing, GroupStyle, Image, LineCap, PathElem, Surface},
    merge::{merge, MergedEntry},
    ActiveRegion, CatalogSet, Color, Error, Gender, Palette, Result, Side, Slug, V2,
};

/// Configuration for how a body diagram should be rendered.  Every field has a default, so a
/// JSON config only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyOpts {
    /// Highlight colours, indexed by intensity.  Defaults to a two-step blue gradient
    pub colors: Palette,
    /// Zoom factor applied to `base_width` and `base_height`
    pub scale: f32,
    pub side: Side,
    pub gender: Gender,
    /// Colour of every region that isn't highlighted.  Defaults to `#cccccc`
    pub neutral_color: Color,
    /// Width of the drawing surface at `scale = 1`
    pub base_width: f32,
    /// Height of the drawing surface at `scale = 1`
    pub base_height: f32,
    /// Outline width, in view box units
    pub stroke_width: f32,
    pub line_cap: LineCap,
    /// Outline colour.  Unstroked if `None`
    pub stroke_color: Option<Color>,
}

impl BodyOpts {
    /// Checks that every size in these options can be drawn
    pub fn validate(&self) -> Result<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(Error::InvalidScale(self.scale));
        }
        let base = [
            ("base_width", self.base_width),
            ("base_height", self.base_height),
        ];
        for (field, value) in base {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidDimension {
                    field,
                    expected: "positive",
                    value,
                });
            }
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(Error::InvalidDimension {
                field: "stroke_width",
                expected: "non-negative",
                value: self.stroke_width,
            });
        }
        Ok(())
    }

    /// Parses options from JSON, filling anything missing from [`BodyOpts::default`]
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: BodyOpts = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }
}

impl Default for BodyOpts {
    fn default() -> Self {
        Self {
            colors: Palette::default(),
            scale: 1.0,
            side: Side::Front,
            gender: Gender::Male,
            neutral_color: Color::NEUTRAL,

            base_width: 200.0,
            base_height: 400.0,
            stroke_width: 2.0,
            line_cap: LineCap::Butt,
            stroke_color: None,
        }
    }
}

/// A body diagram bound to a catalog set.  `Body`s are immutable and can render any number of
/// passes, from any number of threads.
#[derive(Debug, Clone)]
pub struct Body<'c> {
    catalogs: &'c CatalogSet,
    opts: BodyOpts,
}

impl<'c> Body<'c> {
    pub fn new(catalogs: &'c CatalogSet, opts: BodyOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { catalogs, opts })
    }

    pub fn opts(&self) -> &BodyOpts {
        &self.opts
    }

    /// Merge `data` into the catalog for this body's gender and side, and emit the shapes to
    /// draw.  Fails if any highlight's intensity doesn't fit the palette.
    #[instrument(
        skip_all,
        fields(gender = %self.opts.gender, side = %self.opts.side, active = data.len())
    )]
    pub fn render<'h>(&self, data: &[ActiveRegion]) -> Result<RenderedBody<'h>> {
        let catalog = self.catalogs.select(self.opts.gender, self.opts.side);
        let merged = merge(catalog, data, &self.opts.colors, self.opts.neutral_color)?;
        let shapes = emit_shapes(&merged);
        debug!(
            regions = merged.len(),
            shapes = shapes.len(),
            "rendered body"
        );

        let (paths, payloads): (Vec<_>, Vec<_>) =
            shapes.into_iter().map(|s| (s.path, s.payload)).unzip();
        let image = Image {
            surface: Surface {
                view_box: catalog.view_box(),
                size: V2::new(self.opts.base_width, self.opts.base_height) * self.opts.scale,
            },
            group: GroupStyle {
                stroke_width: self.opts.stroke_width,
                fill: None,
                stroke: self.opts.stroke_color,
                line_cap: self.opts.line_cap,
            },
            paths,
        };
        Ok(RenderedBody {
            image,
            payloads,
            on_press: None,
        })
    }
}

impl Body<'static> {
    /// Creates a `Body` over the process-wide catalog set (see [`catalog::install`])
    pub fn from_installed(opts: BodyOpts) -> Result<Self> {
        Self::new(catalog::installed()?, opts)
    }
}

/// A single drawable outline of a region, plus what its press handler receives
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub path: PathElem,
    /// The caller's own highlight request for this region, or a stand-in record holding the
    /// region's slug, colour and outline if it wasn't highlighted
    pub payload: ActiveRegion,
}

/// Emit one [`Shape`] per outline of every merged region.  Regions without any outlines emit
/// nothing.  Every shape is marked pressable; [`RenderedBody`] decides whether a handler is
/// actually attached.
pub fn emit_shapes(merged: &[MergedEntry]) -> Vec<Shape> {
    let mut shapes = Vec::new();
    for entry in merged {
        let outlines = entry
            .paths
            .iter()
            .filter(|d| !d.trim().is_empty())
            .collect::<Vec<_>>();
        if outlines.is_empty() {
            trace!(slug = %entry.slug, "region has no outline; skipping");
            continue;
        }
        let payload = match entry.active {
            Some(active) => active.clone(),
            None => ActiveRegion {
                slug: entry.slug,
                intensity: None,
                color: Some(entry.color),
                path_array: Some(outlines.iter().map(|d| d.to_string()).collect()),
            },
        };
        for d in outlines {
            shapes.push(Shape {
                path: PathElem {
                    d: d.clone(),
                    fill: entry.color,
                    id: entry.slug,
                    pressable: true,
                },
                payload: payload.clone(),
            });
        }
    }
    shapes
}

/// Callback invoked with the pressed region
pub type PressHandler<'h> = Box<dyn FnMut(&ActiveRegion) + 'h>;

/// The output of one render pass: an [`Image`] ready for any [`Backend`], plus what to do when
/// one of its shapes is pressed.
pub struct RenderedBody<'h> {
    image: Image,
    /// One per path of `image`
    payloads: Vec<ActiveRegion>,
    on_press: Option<PressHandler<'h>>,
}

impl<'h> RenderedBody<'h> {
    /// Attaches a press handler
    pub fn on_press(mut self, handler: impl FnMut(&ActiveRegion) + 'h) -> Self {
        self.on_press = Some(Box::new(handler));
        self
    }

    /// The image to draw.  Paths are only marked pressable while a handler is attached.
    pub fn image(&self) -> Image {
        let mut image = self.image.clone();
        let pressable = self.on_press.is_some();
        for p in &mut image.paths {
            p.pressable = pressable;
        }
        image
    }

    pub fn shapes(&self) -> impl Iterator<Item = (&PathElem, &ActiveRegion)> {
        self.image.paths.iter().zip(&self.payloads)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn draw(&self, backend: &dyn Backend) -> Result<Drawing> {
        backend.draw(&self.image())
    }

    /// Presses the shape at index `idx` (as numbered by [`RenderedBody::shapes`] and by
    /// [`Raster::hit_test`](crate::image::raster::Raster)).  Returns `false` if there is no such
    /// shape or no handler.
    pub fn press(&mut self, idx: usize) -> bool {
        let payload = match self.payloads.get(idx) {
            Some(p) => p,
            None => return false,
        };
        match &mut self.on_press {
            Some(handler) => {
                debug!(slug = %payload.slug, idx, "shape pressed");
                handler(payload);
                true
            }
            None => false,
        }
    }

    /// Presses the first shape of the region `slug`, as a markup host would after a click on an
    /// element with that `id`.
    pub fn press_slug(&mut self, slug: Slug) -> bool {
        match self.image.paths.iter().position(|p| p.id == slug) {
            Some(idx) => self.press(idx),
            None => false,
        }
    }
}

impl std::fmt::Debug for RenderedBody<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedBody")
            .field("image", &self.image)
            .field("payloads", &self.payloads)
            .field("on_press", &self.on_press.is_some())
            .finish()
    }
}
