//! Native backend: rasterise an [`Image`] in-process with `tiny-skia`

use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use tiny_skia::{FillRule, Mask, Paint, Path, PathBuilder, Pixmap, Point, Rect, Stroke, Transform};
use tracing::trace;

use crate::{Color, Error, Result, Slug};

use super::{Backend, BackendKind, Drawing, Image, LineCap, Surface};

/// [`Backend`] which draws into a pixel buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterBackend {
    /// Colour painted behind everything.  Transparent if `None`.
    pub background: Option<Color>,
}

impl Backend for RasterBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Native
    }

    fn draw(&self, image: &Image) -> Result<Drawing> {
        rasterize(image, self.background).map(Drawing::Raster)
    }
}

/// A rasterised [`Image`], which remembers the outline of every path so that presses can be
/// mapped back to shapes.
#[derive(Debug, Clone)]
pub struct Raster {
    pixmap: Pixmap,
    /// One per [`Image`] path, in drawing order.  `None` if the path encloses nothing.
    outlines: Vec<Option<Path>>,
    transform: Transform,
}

impl Raster {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Gets the (un-premultiplied) colour of a pixel, or `None` if the pixel is out of bounds or
    /// fully transparent.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        (c.alpha() > 0).then(|| Color::new(c.red(), c.green(), c.blue()))
    }

    /// Finds the index of the topmost path covering the centre of pixel `(x, y)`
    pub fn hit_test(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y * self.width() + x) as usize;
        // Pixel centre in view box coordinates, to rule paths out by their bounds
        let mut centre = Point::from_xy(x as f32 + 0.5, y as f32 + 0.5);
        self.transform.invert()?.map_point(&mut centre);
        self.outlines
            .iter()
            .enumerate()
            .rev()
            .find(|(_, outline)| match outline {
                Some(path) if may_contain(path.bounds(), centre) => {
                    let mut mask = match Mask::new(self.width(), self.height()) {
                        Some(m) => m,
                        None => return false,
                    };
                    mask.fill_path(path, FillRule::Winding, false, self.transform);
                    mask.data()[offset] > 0
                }
                _ => false,
            })
            .map(|(idx, _)| idx)
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::Encode(e.to_string()))
    }
}

/// Rasterise an [`Image`], optionally on top of a solid background
pub fn rasterize(image: &Image, background: Option<Color>) -> Result<Raster> {
    let (width, height) = pixel_size(&image.surface);
    let mut pixmap = Pixmap::new(width, height).ok_or(Error::Surface { width, height })?;
    if let Some(bg) = background {
        let rgb = bg.rgb();
        pixmap.fill(tiny_skia::Color::from_rgba8(rgb.r, rgb.g, rgb.b, 255));
    }

    let transform = view_transform(&image.surface, width, height);
    let stroke = image.group.stroke.map(|color| {
        let stroke = Stroke {
            width: image.group.stroke_width,
            line_cap: match image.group.line_cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            ..Stroke::default()
        };
        (paint(color), stroke)
    });

    let mut outlines = Vec::with_capacity(image.paths.len());
    for elem in &image.paths {
        let outline = parse_path(elem.id, &elem.d)?;
        match &outline {
            Some(path) => {
                pixmap.fill_path(path, &paint(elem.fill), FillRule::Winding, transform, None);
                if let Some((stroke_paint, stroke)) = &stroke {
                    pixmap.stroke_path(path, stroke_paint, stroke, transform, None);
                }
            }
            None => trace!(slug = %elem.id, "path encloses nothing; not drawn"),
        }
        outlines.push(outline);
    }

    Ok(Raster {
        pixmap,
        outlines,
        transform,
    })
}

/// Half-pixel slack on every side, since the mask is rasterised on the pixel grid
fn may_contain(bounds: Rect, p: Point) -> bool {
    let slack = 0.5;
    p.x >= bounds.left() - slack
        && p.x <= bounds.right() + slack
        && p.y >= bounds.top() - slack
        && p.y <= bounds.bottom() + slack
}

fn pixel_size(surface: &Surface) -> (u32, u32) {
    let px = |v: f32| if v.is_finite() && v > 0.0 { v.ceil() as u32 } else { 0 };
    (px(surface.width()), px(surface.height()))
}

/// Maps view box coordinates onto the pixel grid, stretching to fill it
fn view_transform(surface: &Surface, width: u32, height: u32) -> Transform {
    let vb = surface.view_box;
    Transform::from_scale(width as f32 / vb.width, height as f32 / vb.height)
        .pre_translate(-vb.min_x, -vb.min_y)
}

fn paint(color: Color) -> Paint<'static> {
    let rgb = color.rgb();
    let mut paint = Paint::default();
    paint.set_color_rgba8(rgb.r, rgb.g, rgb.b, 255);
    paint.anti_alias = true;
    paint
}

/// Parse SVG path data into a `tiny-skia` path.  Returns `Ok(None)` for data which is valid but
/// encloses nothing.
fn parse_path(slug: Slug, d: &str) -> Result<Option<Path>> {
    let mut builder = PathBuilder::new();
    for segment in SimplifyingPathParser::from(d) {
        let segment = segment.map_err(|e| Error::PathData {
            slug,
            reason: e.to_string(),
        })?;
        match segment {
            SimplePathSegment::MoveTo { x, y } => builder.move_to(x as f32, y as f32),
            SimplePathSegment::LineTo { x, y } => builder.line_to(x as f32, y as f32),
            SimplePathSegment::Quadratic { x1, y1, x, y } => {
                builder.quad_to(x1 as f32, y1 as f32, x as f32, y as f32)
            }
            SimplePathSegment::CurveTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => builder.cubic_to(
                x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
            ),
            SimplePathSegment::ClosePath => builder.close(),
        }
    }
    Ok(builder.finish())
}
