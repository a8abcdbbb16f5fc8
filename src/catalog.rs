//! The fixed region catalogs: for each gender and side, which regions exist and what their
//! outlines look like.  The coordinate data itself is supplied as JSON by the host; this module
//! validates it once and then hands out read-only views.

use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
    str::FromStr,
    sync::OnceLock,
};

use serde::{de, Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::{Error, Result, Slug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(Error::UnknownGender(s.to_owned())),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            _ => Err(Error::UnknownSide(s.to_owned())),
        }
    }
}

// Parsed through `FromStr`, so JSON and command-line input fail with the same message
impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Side::Front => "front",
            Side::Back => "back",
        })
    }
}

/// The visible window of catalog coordinate space, in SVG `viewBox` order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f32,
    pub min_y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewBox {
    pub fn new(min_x: f32, min_y: f32, width: f32, height: f32) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// The window that the stock body artwork is drawn in for each gender and side
    pub fn default_for(gender: Gender, side: Side) -> Self {
        match (gender, side) {
            (Gender::Male, Side::Front) => Self::new(0.0, 0.0, 724.0, 1448.0),
            (Gender::Male, Side::Back) => Self::new(724.0, 0.0, 724.0, 1448.0),
            (Gender::Female, Side::Front) => Self::new(-50.0, -40.0, 734.0, 1538.0),
            (Gender::Female, Side::Back) => Self::new(756.0, 0.0, 774.0, 1448.0),
        }
    }
}

impl FromStr for ViewBox {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidViewBox(s.to_owned());
        let nums = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f32>().map_err(|_| invalid()))
            .collect::<Result<Vec<f32>>>()?;
        match nums.as_slice() {
            &[min_x, min_y, width, height] if width > 0.0 && height > 0.0 => {
                Ok(Self::new(min_x, min_y, width, height))
            }
            _ => Err(invalid()),
        }
    }
}

impl Display for ViewBox {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

impl<'de> Deserialize<'de> for ViewBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One region of a catalog, along with every path that makes up its outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub slug: Slug,
    #[serde(default)]
    pub path_array: Vec<String>,
}

impl CatalogEntry {
    pub fn new(slug: Slug, path_array: Vec<String>) -> Self {
        Self { slug, path_array }
    }
}

/// The regions drawn for one gender and side, in drawing order
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    view_box: ViewBox,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a `Catalog`, checking that no region is listed twice.  `name` is only used for
    /// error messages.
    pub fn new(name: &'static str, view_box: ViewBox, entries: Vec<CatalogEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for e in &entries {
            if !seen.insert(e.slug) {
                return Err(Error::DuplicateSlug {
                    catalog: name,
                    slug: e.slug,
                });
            }
        }
        Ok(Self { view_box, entries })
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, slug: Slug) -> bool {
        self.entries.iter().any(|e| e.slug == slug)
    }
}

/// All four catalogs, one per (gender, side) pair
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSet {
    male_front: Catalog,
    male_back: Catalog,
    female_front: Catalog,
    female_back: Catalog,
}

impl CatalogSet {
    pub fn new(
        male_front: Catalog,
        male_back: Catalog,
        female_front: Catalog,
        female_back: Catalog,
    ) -> Self {
        Self {
            male_front,
            male_back,
            female_front,
            female_back,
        }
    }

    /// Parses a catalog set from JSON of the form
    /// `{"male_front": {"view_box": "0 0 724 1448", "regions": [{"slug": .., "pathArray": [..]}]}, ..}`.
    /// `view_box` may be omitted, in which case [`ViewBox::default_for`] is used.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: CatalogSetDef = serde_json::from_str(json)?;
        let build = |name, gender, side, def: CatalogDef| {
            let view_box = def
                .view_box
                .unwrap_or_else(|| ViewBox::default_for(gender, side));
            Catalog::new(name, view_box, def.regions)
        };
        let set = Self {
            male_front: build("male front", Gender::Male, Side::Front, def.male_front)?,
            male_back: build("male back", Gender::Male, Side::Back, def.male_back)?,
            female_front: build("female front", Gender::Female, Side::Front, def.female_front)?,
            female_back: build("female back", Gender::Female, Side::Back, def.female_back)?,
        };
        debug!(
            male_front = set.male_front.len(),
            male_back = set.male_back.len(),
            female_front = set.female_front.len(),
            female_back = set.female_back.len(),
            "loaded catalog set"
        );
        Ok(set)
    }

    /// Gets the catalog for a given gender and side
    pub fn select(&self, gender: Gender, side: Side) -> &Catalog {
        match (gender, side) {
            (Gender::Male, Side::Front) => &self.male_front,
            (Gender::Male, Side::Back) => &self.male_back,
            (Gender::Female, Side::Front) => &self.female_front,
            (Gender::Female, Side::Back) => &self.female_back,
        }
    }

    /// Like [`CatalogSet::select`], but takes the gender and side by name
    pub fn select_by_name(&self, gender: &str, side: &str) -> Result<&Catalog> {
        Ok(self.select(gender.parse()?, side.parse()?))
    }
}

#[derive(Deserialize)]
struct CatalogSetDef {
    male_front: CatalogDef,
    male_back: CatalogDef,
    female_front: CatalogDef,
    female_back: CatalogDef,
}

#[derive(Deserialize)]
struct CatalogDef {
    #[serde(default)]
    view_box: Option<ViewBox>,
    regions: Vec<CatalogEntry>,
}

////////////////////////
// PROCESS-WIDE STATE //
////////////////////////

static INSTALLED: OnceLock<CatalogSet> = OnceLock::new();

/// Installs the catalog set used by [`Body::from_installed`](crate::Body::from_installed).  This
/// can only happen once per process.
pub fn install(set: CatalogSet) -> Result<&'static CatalogSet> {
    INSTALLED
        .set(set)
        .map_err(|_| Error::CatalogAlreadyInstalled)?;
    installed()
}

/// Gets the catalog set previously passed to [`install`]
pub fn installed() -> Result<&'static CatalogSet> {
    INSTALLED.get().ok_or(Error::CatalogNotInstalled)
}
