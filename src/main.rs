//! Render a body diagram to a file.
//!
//! ```bash
//! # Highlight the regions in data.json, as SVG
//! bodymap catalog.json --data data.json --out body.svg --backend markup
//!
//! # Female back view as PNG, pressing (toggling) two regions first
//! bodymap catalog.json --gender female --side back --press gluteal --press calves --out body.png
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use bodymap::{
    image::{self, BackendKind, Drawing},
    ActiveRegion, Body, BodyOpts, CatalogSet, Gender, Palette, Side, Slug,
};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Render an anatomical body diagram with highlighted regions
#[derive(Parser)]
#[command(name = "bodymap")]
#[command(version)]
struct Cli {
    /// JSON file holding the four region catalogs
    catalog: PathBuf,

    /// JSON file holding the highlighted regions
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON file holding rendering options; flags below override it
    #[arg(long)]
    opts: Option<PathBuf>,

    #[arg(short, long)]
    gender: Option<Gender>,

    #[arg(short, long)]
    side: Option<Side>,

    #[arg(long)]
    scale: Option<f32>,

    /// Comma-separated palette, indexed by intensity
    #[arg(short, long, value_delimiter = ',')]
    colors: Option<Vec<String>>,

    /// `markup` (SVG) or `native` (PNG).  Defaults to the platform's backend
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Press a region before drawing, toggling its highlight
    #[arg(short, long)]
    press: Vec<Slug>,

    /// Output file
    #[arg(short, long, default_value = "body.svg")]
    out: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bodymap=info")),
        )
        .init();

    let cli = Cli::parse();

    let catalogs = CatalogSet::from_json(&read(&cli.catalog)?)?;
    let mut opts = match &cli.opts {
        Some(path) => BodyOpts::from_json(&read(path)?)?,
        None => BodyOpts::default(),
    };
    if let Some(gender) = cli.gender {
        opts.gender = gender;
    }
    if let Some(side) = cli.side {
        opts.side = side;
    }
    if let Some(scale) = cli.scale {
        opts.scale = scale;
    }
    if let Some(colors) = &cli.colors {
        opts.colors = Palette::parse(colors.iter().map(String::as_str))?;
    }
    let mut data: Vec<ActiveRegion> = match &cli.data {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("parsing {}", path.display()))?,
        None => Vec::new(),
    };

    let backend = image::init(cli.backend.unwrap_or_else(BackendKind::detect))?;
    let body = Body::new(&catalogs, opts)?;

    if !cli.press.is_empty() {
        let mut pressed = Vec::new();
        {
            let mut rendered = body
                .render(&data)?
                .on_press(|region: &ActiveRegion| pressed.push(region.clone()));
            for &slug in &cli.press {
                if !rendered.press_slug(slug) {
                    warn!(%slug, "nothing to press; region isn't drawn in this view");
                }
            }
        }
        for region in pressed {
            println!("{}", serde_json::to_string(&region)?);
            toggle(&mut data, region);
        }
    }

    let drawing = body.render(&data)?.draw(backend)?;
    let written = match drawing {
        Drawing::Markup(svg) => fs::write(&cli.out, svg),
        #[cfg(feature = "native")]
        Drawing::Raster(raster) => fs::write(&cli.out, raster.encode_png()?),
    };
    written.with_context(|| format!("writing {}", cli.out.display()))?;
    info!(out = %cli.out.display(), backend = %backend.kind(), "wrote body diagram");

    Ok(())
}

/// Un-highlight a pressed region if it was highlighted, otherwise highlight it at intensity 1
fn toggle(data: &mut Vec<ActiveRegion>, pressed: ActiveRegion) {
    let before = data.len();
    data.retain(|r| r.slug != pressed.slug);
    if data.len() == before {
        data.push(ActiveRegion {
            intensity: Some(1),
            path_array: None,
            ..pressed
        });
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
