//! Code to convert an [`Image`] to an SVG string

use simple_xml_builder::XMLElement;

use crate::Result;

use super::{Backend, BackendKind, Drawing, GroupStyle, Image, PathElem};

/// [`Backend`] which emits SVG markup
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupBackend;

impl Backend for MarkupBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Markup
    }

    fn draw(&self, image: &Image) -> Result<Drawing> {
        Ok(Drawing::Markup(gen_svg(image).to_string()))
    }
}

/// Generate an SVG root element for an [`Image`].  The root holds a single `<g>`, which holds one
/// `<path>` per [`PathElem`].
pub fn gen_svg(image: &Image) -> XMLElement {
    let mut root = XMLElement::new("svg");
    root.add_attribute("viewBox", &image.surface.view_box.to_string());
    root.add_attribute("width", &image.surface.width().to_string());
    root.add_attribute("height", &image.surface.height().to_string());
    root.add_attribute("xmlns", "http://www.w3.org/2000/svg");
    root.add_attribute("style", "display: block");

    let mut group = gen_group(&image.group);
    for path in &image.paths {
        group.add_child(gen_path(path));
    }
    root.add_child(group);

    root
}

fn gen_group(style: &GroupStyle) -> XMLElement {
    let mut group = XMLElement::new("g");
    group.add_attribute("stroke-width", &style.stroke_width.to_string());
    match style.fill {
        Some(c) => group.add_attribute("fill", &c.to_string()),
        None => group.add_attribute("fill", "none"), // Paths carry their own fill
    }
    if let Some(c) = style.stroke {
        group.add_attribute("stroke", &c.to_string());
    }
    group.add_attribute("stroke-linecap", style.line_cap.as_str());
    group
}

fn gen_path(path: &PathElem) -> XMLElement {
    let mut elem = XMLElement::new("path");
    elem.add_attribute("id", path.id.as_str());
    elem.add_attribute("d", &path.d);
    elem.add_attribute("fill", &path.fill.to_string());
    if path.pressable {
        elem.add_attribute("style", "cursor: pointer");
    }
    elem
}
