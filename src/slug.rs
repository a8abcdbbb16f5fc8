//! The closed vocabulary of body region identifiers.  Each catalog region and each highlight
//! request names its region with a [`Slug`].
//!
//! Two naming styles exist side by side: *detailed* identifiers, which carry left/right (and
//! sometimes front/back) suffixes, and *collapsed* identifiers, which name a whole region at
//! once and are used by the alternate female catalog.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// Which naming scheme a [`Slug`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlugStyle {
    Detailed,
    Collapsed,
}

macro_rules! slugs {
    ($( $variant: ident => $name: literal, $style: ident; )*) => {
        /// Identifier of a single anatomical region
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Slug {
            $( $variant, )*
        }

        impl Slug {
            /// Every identifier, in declaration order
            pub const ALL: &'static [Slug] = &[$( Slug::$variant, )*];

            /// The kebab-case name of this identifier, as used in catalogs and markup `id`s
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Slug::$variant => $name, )*
                }
            }

            pub fn style(self) -> SlugStyle {
                match self {
                    $( Slug::$variant => SlugStyle::$style, )*
                }
            }
        }

        impl FromStr for Slug {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Slug::$variant), )*
                    _ => Err(Error::UnknownSlug(s.to_owned())),
                }
            }
        }
    };
}

slugs! {
    AbsUpper => "abs-upper", Detailed;
    AbsLower => "abs-lower", Detailed;
    AdductorsLeftFront => "adductors-left-front", Detailed;
    AdductorsRightFront => "adductors-right-front", Detailed;
    AdductorsLeftBack => "adductors-left-back", Detailed;
    AdductorsRightBack => "adductors-right-back", Detailed;
    AnklesLeftFront => "ankles-left-front", Detailed;
    AnklesRightFront => "ankles-right-front", Detailed;
    AnklesLeftBack => "ankles-left-back", Detailed;
    AnklesRightBack => "ankles-right-back", Detailed;
    BicepsLeft => "biceps-left", Detailed;
    BicepsRight => "biceps-right", Detailed;
    CalvesLeftFront => "calves-left-front", Detailed;
    CalvesRightFront => "calves-right-front", Detailed;
    CalvesLeftBack => "calves-left-back", Detailed;
    CalvesRightBack => "calves-right-back", Detailed;
    ChestLeft => "chest-left", Detailed;
    ChestRight => "chest-right", Detailed;
    DeltoidsLeftFront => "deltoids-left-front", Detailed;
    DeltoidsRightFront => "deltoids-right-front", Detailed;
    DeltoidsLeftBack => "deltoids-left-back", Detailed;
    DeltoidsRightBack => "deltoids-right-back", Detailed;
    FeetRightFront => "feet-right-front", Detailed;
    FeetLeftFront => "feet-left-front", Detailed;
    FeetRightBack => "feet-right-back", Detailed;
    FeetLeftBack => "feet-left-back", Detailed;
    ForearmLeftFront => "forearm-left-front", Detailed;
    ForearmRightFront => "forearm-right-front", Detailed;
    ForearmLeftBack => "forearm-left-back", Detailed;
    ForearmRightBack => "forearm-right-back", Detailed;
    GlutealLeft => "gluteal-left", Detailed;
    GlutealRight => "gluteal-right", Detailed;
    HamstringLeft => "hamstring-left", Detailed;
    HamstringRight => "hamstring-right", Detailed;
    HandsLeftFront => "hands-left-front", Detailed;
    HandsRightFront => "hands-right-front", Detailed;
    HandsLeftBack => "hands-left-back", Detailed;
    HandsRightBack => "hands-right-back", Detailed;
    HeadFront => "head-front", Detailed;
    HeadBack => "head-back", Detailed;
    KneesLeft => "knees-left", Detailed;
    KneesRight => "knees-right", Detailed;
    LowerBackLeft => "lower-back-left", Detailed;
    LowerBackRight => "lower-back-right", Detailed;
    HipsLeft => "hips-left", Detailed;
    HipsRight => "hips-right", Detailed;
    NeckLeftFront => "neck-left-front", Detailed;
    NeckRightFront => "neck-right-front", Detailed;
    NeckLeftBack => "neck-left-back", Detailed;
    NeckRightBack => "neck-right-back", Detailed;
    ObliquesLeft => "obliques-left", Detailed;
    ObliquesRight => "obliques-right", Detailed;
    QuadricepsLeft => "quadriceps-left", Detailed;
    QuadricepsRight => "quadriceps-right", Detailed;
    TibialisLeft => "tibialis-left", Detailed;
    TibialisRight => "tibialis-right", Detailed;
    TrapeziusLeftFront => "trapezius-left-front", Detailed;
    TrapeziusRightFront => "trapezius-right-front", Detailed;
    TrapeziusLeftBack => "trapezius-left-back", Detailed;
    TrapeziusRightBack => "trapezius-right-back", Detailed;
    TricepsLeftFront => "triceps-left-front", Detailed;
    TricepsRightFront => "triceps-right-front", Detailed;
    TricepsLeftBack => "triceps-left-back", Detailed;
    TricepsRightBack => "triceps-right-back", Detailed;
    UpperBackLeft => "upper-back-left", Detailed;
    UpperBackRight => "upper-back-right", Detailed;

    Hair => "hair", Collapsed;
    Neck => "neck", Collapsed;
    Trapezius => "trapezius", Collapsed;
    Deltoids => "deltoids", Collapsed;
    UpperBack => "upper-back", Collapsed;
    LowerBack => "lower-back", Collapsed;
    Triceps => "triceps", Collapsed;
    Forearm => "forearm", Collapsed;
    Hands => "hands", Collapsed;
    Gluteal => "gluteal", Collapsed;
    Adductors => "adductors", Collapsed;
    Hamstring => "hamstring", Collapsed;
    Calves => "calves", Collapsed;
    Feet => "feet", Collapsed;
    Head => "head", Collapsed;
    Chest => "chest", Collapsed;
    Biceps => "biceps", Collapsed;
    Obliques => "obliques", Collapsed;
    Abs => "abs", Collapsed;
    Quadriceps => "quadriceps", Collapsed;
    Knees => "knees", Collapsed;
    Tibialis => "tibialis", Collapsed;
    Ankles => "ankles", Collapsed;
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Slug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
