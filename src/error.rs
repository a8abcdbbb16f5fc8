use crate::{image::BackendKind, Slug};

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// The ways that rendering a body diagram can fail
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown gender {0:?} (expected \"male\" or \"female\")")]
    UnknownGender(String),
    #[error("unknown side {0:?} (expected \"front\" or \"back\")")]
    UnknownSide(String),
    #[error("unknown region identifier {0:?}")]
    UnknownSlug(String),
    #[error("region {slug} has intensity {intensity}, but the palette only has {palette_len} colors")]
    IntensityOutOfRange {
        slug: Slug,
        intensity: u32,
        palette_len: usize,
    },
    #[error("invalid color {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("invalid view box {0:?} (expected four numbers, with positive width and height)")]
    InvalidViewBox(String),
    #[error("scale must be a positive finite number, got {0}")]
    InvalidScale(f32),
    #[error("{field} must be a {expected} finite number, got {value}")]
    InvalidDimension {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
    #[error("region {slug} appears more than once in the {catalog} catalog")]
    DuplicateSlug { catalog: &'static str, slug: Slug },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("a catalog set has already been installed for this process")]
    CatalogAlreadyInstalled,
    #[error("no catalog set has been installed for this process")]
    CatalogNotInstalled,

    #[error("the {backend} backend is unavailable: missing {capability}")]
    BackendUnavailable {
        backend: BackendKind,
        capability: &'static str,
    },
    #[error("the {active} backend is already active; cannot switch to {requested}")]
    BackendAlreadyInitialized {
        active: BackendKind,
        requested: BackendKind,
    },
    #[error("path data for region {slug} could not be parsed: {reason}")]
    PathData { slug: Slug, reason: String },
    #[error("cannot allocate a {width}x{height} drawing surface")]
    Surface { width: u32, height: u32 },
    #[error("failed to encode drawing: {0}")]
    Encode(String),
}

impl Error {
    /// Returns `true` if this error was caused by the caller's inputs (options, catalog or
    /// active regions) rather than by the drawing backend.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownGender(_)
                | Error::UnknownSide(_)
                | Error::UnknownSlug(_)
                | Error::IntensityOutOfRange { .. }
                | Error::InvalidColor(_)
                | Error::InvalidViewBox(_)
                | Error::InvalidScale(_)
                | Error::InvalidDimension { .. }
                | Error::DuplicateSlug { .. }
                | Error::Json(_)
        )
    }
}
