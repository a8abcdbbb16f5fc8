//! Choosing and caching the provider of drawing primitives

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    sync::OnceLock,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, Result};

use super::{svg::MarkupBackend, Image};

/// Which family of drawing primitives a [`Backend`] provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// SVG markup, for browser-style hosts
    Markup,
    /// Pixels, rasterised in-process
    Native,
}

impl BackendKind {
    /// The backend expected for the target this crate was compiled for
    pub fn detect() -> Self {
        if cfg!(target_arch = "wasm32") {
            BackendKind::Markup
        } else {
            BackendKind::Native
        }
    }

    /// Whether this build carries the primitives for this kind of backend
    pub fn is_available(self) -> bool {
        match self {
            BackendKind::Markup => true,
            BackendKind::Native => cfg!(feature = "native"),
        }
    }

    fn unavailable(self) -> Error {
        Error::BackendUnavailable {
            backend: self,
            capability: match self {
                BackendKind::Markup => "SVG writer",
                BackendKind::Native => "path rasteriser (built without the `native` feature)",
            },
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BackendKind::Markup => "markup",
            BackendKind::Native => "native",
        })
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "markup" | "svg" => Ok(BackendKind::Markup),
            "native" | "raster" => Ok(BackendKind::Native),
            _ => Err(format!("unknown backend {:?} (expected markup or native)", s)),
        }
    }
}

/// A provider of drawing primitives: something that can turn an [`Image`] into output
pub trait Backend: Send + Sync {
    fn kind(&self) -> BackendKind;

    fn draw(&self, image: &Image) -> Result<Drawing>;
}

/// The output of a [`Backend`]
#[derive(Debug)]
pub enum Drawing {
    Markup(String),
    #[cfg(feature = "native")]
    Raster(super::raster::Raster),
}

impl Drawing {
    pub fn as_markup(&self) -> Option<&str> {
        match self {
            Drawing::Markup(s) => Some(s),
            #[cfg(feature = "native")]
            Drawing::Raster(_) => None,
        }
    }

    #[cfg(feature = "native")]
    pub fn as_raster(&self) -> Option<&super::raster::Raster> {
        match self {
            Drawing::Raster(r) => Some(r),
            Drawing::Markup(_) => None,
        }
    }
}

/// Constructs a [`Backend`] of the given kind, failing immediately if its primitives weren't
/// compiled into this build.
pub fn resolve(kind: BackendKind) -> Result<Box<dyn Backend>> {
    if !kind.is_available() {
        return Err(kind.unavailable());
    }
    match kind {
        BackendKind::Markup => Ok(Box::new(MarkupBackend)),
        BackendKind::Native => native(),
    }
}

#[cfg(feature = "native")]
fn native() -> Result<Box<dyn Backend>> {
    Ok(Box::new(super::raster::RasterBackend::default()))
}

#[cfg(not(feature = "native"))]
fn native() -> Result<Box<dyn Backend>> {
    Err(BackendKind::Native.unavailable())
}

static ACTIVE: OnceLock<Box<dyn Backend>> = OnceLock::new();

/// Resolves the process-wide [`Backend`] on first call, then returns the same one on every
/// later call.  Asking for a different kind once a backend is active is an error.
pub fn init(kind: BackendKind) -> Result<&'static dyn Backend> {
    let backend = match ACTIVE.get() {
        Some(b) => b,
        None => {
            let fresh = resolve(kind)?;
            // If another thread won the race, its backend is kept and `fresh` is dropped
            let b = ACTIVE.get_or_init(|| fresh);
            info!(kind = %b.kind(), "drawing backend initialised");
            b
        }
    };
    if backend.kind() != kind {
        return Err(Error::BackendAlreadyInitialized {
            active: backend.kind(),
            requested: kind,
        });
    }
    Ok(backend.as_ref())
}

/// The backend set up by [`init`], if any
pub fn active() -> Option<&'static dyn Backend> {
    ACTIVE.get().map(|b| b.as_ref())
}
