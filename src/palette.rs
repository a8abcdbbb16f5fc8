//! Colors, palettes and the rule that decides which color a highlighted region is drawn with.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use itertools::Itertools;
use rgb::RGB8;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{ActiveRegion, Error, Result};

/// An opaque 24-bit colour.  Parsed from `#rgb` or `#rrggbb`, always displayed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub RGB8);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color(RGB8 { r, g, b })
    }

    /// The grey used for every region that isn't highlighted
    pub const NEUTRAL: Color = Color::new(0xcc, 0xcc, 0xcc);

    pub fn rgb(self) -> RGB8 {
        self.0
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digit = |c: char| c.to_digit(16).map(|d| d as u8).ok_or_else(invalid);
        let chars = hex.chars().collect_vec();
        let (r, g, b) = match chars.as_slice() {
            // Short form: each digit is doubled, so `#abc` == `#aabbcc`
            &[r, g, b] => (digit(r)? * 17, digit(g)? * 17, digit(b)? * 17),
            &[r1, r2, g1, g2, b1, b2] => (
                digit(r1)? << 4 | digit(r2)?,
                digit(g1)? << 4 | digit(g2)?,
                digit(b1)? << 4 | digit(b2)?,
            ),
            _ => return Err(invalid()),
        };
        Ok(Color::new(r, g, b))
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let RGB8 { r, g, b } = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// An ordered list of colours, indexed by (1-based) intensity level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Parses every string as a [`Color`]
    pub fn parse<'s>(colors: impl IntoIterator<Item = &'s str>) -> Result<Self> {
        let colors = colors
            .into_iter()
            .map(str::parse)
            .collect::<Result<Vec<Color>>>()?;
        Ok(Self { colors })
    }

    /// Gets the colour for a 1-based intensity level.  Returns `None` for level `0` and for any
    /// level past the end of the palette.
    pub fn get(&self, intensity: u32) -> Option<Color> {
        let idx = (intensity as usize).checked_sub(1)?;
        self.colors.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    /// Two-step blue gradient
    fn default() -> Self {
        Self::new(vec![Color::new(0x09, 0x84, 0xe3), Color::new(0x74, 0xb9, 0xff)])
    }
}

/// Decide the fill colour of a highlighted region.  A present, non-zero intensity always wins
/// and indexes the palette (1-based); otherwise the region's explicit colour is used, and
/// failing that, `default`.
pub fn resolve_color(active: &ActiveRegion, palette: &Palette, default: Color) -> Result<Color> {
    match active.intensity {
        Some(intensity) if intensity >= 1 => {
            palette
                .get(intensity)
                .ok_or_else(|| Error::IntensityOutOfRange {
                    slug: active.slug,
                    intensity,
                    palette_len: palette.len(),
                })
        }
        _ => Ok(active.color.unwrap_or(default)),
    }
}
