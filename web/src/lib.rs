//! Browser bindings: render body diagrams to SVG markup and resolve clicks on them.

use bodymap::{
    image::{self, BackendKind},
    ActiveRegion, Body, BodyOpts, CatalogSet, Slug,
};
use wasm_bindgen::prelude::*;

/// A body diagram whose catalogs and options are fixed at construction
#[wasm_bindgen]
pub struct BodyView {
    catalogs: CatalogSet,
    opts: BodyOpts,
}

#[wasm_bindgen]
impl BodyView {
    /// `catalog_json` holds the four region catalogs; `opts_json` optionally overrides any
    /// rendering options.
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: &str, opts_json: Option<String>) -> Result<BodyView, JsValue> {
        let catalogs = CatalogSet::from_json(catalog_json).map_err(to_js)?;
        let opts = match opts_json {
            Some(json) => BodyOpts::from_json(&json).map_err(to_js)?,
            None => BodyOpts::default(),
        };
        Ok(BodyView { catalogs, opts })
    }

    /// Render a JSON array of highlighted regions to an `<svg>` string
    pub fn render(&self, data_json: &str) -> Result<String, JsValue> {
        let data = parse_data(data_json)?;
        let backend = image::init(BackendKind::Markup).map_err(to_js)?;
        let drawing = self
            .body()?
            .render(&data)
            .map_err(to_js)?
            .draw(backend)
            .map_err(to_js)?;
        drawing
            .as_markup()
            .map(str::to_owned)
            .ok_or_else(|| JsValue::from_str("markup backend returned no markup"))
    }

    /// Resolve a click on the element whose `id` is `slug`.  Returns the pressed region as JSON,
    /// or `undefined` if that region isn't drawn in this view.
    pub fn press(&self, data_json: &str, slug: &str) -> Result<Option<String>, JsValue> {
        let data = parse_data(data_json)?;
        let slug: Slug = slug.parse().map_err(to_js)?;
        let mut pressed = None;
        {
            let mut rendered = self
                .body()?
                .render(&data)
                .map_err(to_js)?
                .on_press(|region: &ActiveRegion| pressed = Some(region.clone()));
            rendered.press_slug(slug);
        }
        pressed
            .map(|region| serde_json::to_string(&region))
            .transpose()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl BodyView {
    fn body(&self) -> Result<Body<'_>, JsValue> {
        Body::new(&self.catalogs, self.opts.clone()).map_err(to_js)
    }
}

fn parse_data(json: &str) -> Result<Vec<ActiveRegion>, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js(e: bodymap::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}
