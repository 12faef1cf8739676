use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Couleurs nommées acceptées en plus de la notation hexadécimale.
const NAMED_COLORS: &[(&str, Rgb)] = &[
    ("white", Rgb(255, 255, 255)),
    ("black", Rgb(0, 0, 0)),
    ("green", Rgb(0, 128, 0)),
    ("yellow", Rgb(255, 255, 0)),
    ("gray", Rgb(128, 128, 128)),
    ("grey", Rgb(128, 128, 128)),
    ("teal", Rgb(0, 128, 128)),
];

/// Couleur RGB 8 bits. Sérialisée en `"#rrggbb"`.
///
/// # Example
/// ```
/// use uc_core::color::Rgb;
/// let c: Rgb = "#ffdd57".parse().unwrap();
/// assert_eq!(c, Rgb(0xff, 0xdd, 0x57));
/// assert_eq!(c.to_string(), "#ffdd57");
/// assert_eq!("green".parse::<Rgb>().unwrap(), Rgb(0, 128, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Self = Self(255, 255, 255);
    pub const BLACK: Self = Self(0, 0, 0);

    /// Pixel RGBA opaque.
    #[inline]
    #[must_use]
    pub const fn rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

impl FromStr for Rgb {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || CoreError::InvalidColor {
            value: s.to_string(),
        };

        if let Some(hex) = value.strip_prefix('#') {
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
            return match hex.len() {
                6 => Ok(Self(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                // #rgb → #rrggbb
                3 => Ok(Self(
                    channel(&hex[0..1])? * 17,
                    channel(&hex[1..2])? * 17,
                    channel(&hex[2..3])? * 17,
                )),
                _ => Err(invalid()),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(value))
            .map(|&(_, rgb)| rgb)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for Rgb {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// One `label → color` entry of a lookup.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorEntry {
    pub label: String,
    pub color: Rgb,
}

/// Table de correspondance libellé → couleur, ordonnée (ordre de légende).
///
/// Le `fallback` est obligatoire : tout libellé inconnu ou cellule vide
/// prend cette couleur.
///
/// # Example
/// ```
/// use uc_core::color::{ColorLookup, Rgb};
/// let lookup = ColorLookup::new(Rgb::WHITE).with("EVSE", Rgb(0xff, 0xdd, 0x57));
/// assert_eq!(lookup.resolve(Some("EVSE")), Rgb(0xff, 0xdd, 0x57));
/// assert_eq!(lookup.resolve(Some("EVSE, Session")), Rgb::WHITE);
/// assert_eq!(lookup.resolve(None), Rgb::WHITE);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColorLookup {
    #[serde(default)]
    pub entries: Vec<ColorEntry>,
    pub fallback: Rgb,
}

impl ColorLookup {
    /// Empty lookup; everything resolves to `fallback`.
    #[must_use]
    pub fn new(fallback: Rgb) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    /// Ajoute une entrée en fin de table (ordre de légende).
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, color: Rgb) -> Self {
        self.entries.push(ColorEntry {
            label: label.into(),
            color,
        });
        self
    }

    /// Exact-match lookup; first entry wins on duplicate labels.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.color)
    }

    /// Couleur d'une cellule : entrée correspondante, sinon `fallback`.
    #[must_use]
    pub fn resolve(&self, label: Option<&str>) -> Rgb {
        label.and_then(|l| self.get(l)).unwrap_or(self.fallback)
    }
}

/// Couleurs de surlignage des libellés de ligne selon le périmètre MVP.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScopeColors {
    pub in_scope: Rgb,
    pub out_of_scope: Rgb,
    /// Couleur du texte posé sur le surlignage.
    pub text: Rgb,
}

impl ScopeColors {
    #[must_use]
    pub fn resolve(&self, in_scope: bool) -> Rgb {
        if in_scope {
            self.in_scope
        } else {
            self.out_of_scope
        }
    }
}
