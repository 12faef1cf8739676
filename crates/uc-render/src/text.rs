use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use uc_core::color::Rgb;
use uc_core::frame::FrameBuffer;

use crate::error::RenderError;

/// Emplacements usuels d'une police sans-serif, essayés dans l'ordre.
pub const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Largeur moyenne d'un caractère (en fraction de la taille) quand aucune police n'est chargée.
const ESTIMATED_ADVANCE: f32 = 0.55;
/// Hauteur de ligne estimée (en fraction de la taille).
const ESTIMATED_LINE: f32 = 1.2;

/// Alignement horizontal du point d'ancrage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Alignement vertical du point d'ancrage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// Point du texte qui est posé sur la position demandée (avant rotation).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub h: HAlign,
    pub v: VAlign,
}

impl Anchor {
    pub const TOP_LEFT: Self = Self {
        h: HAlign::Left,
        v: VAlign::Top,
    };
    pub const TOP_CENTER: Self = Self {
        h: HAlign::Center,
        v: VAlign::Top,
    };
    pub const CENTER: Self = Self {
        h: HAlign::Center,
        v: VAlign::Middle,
    };
    pub const MIDDLE_LEFT: Self = Self {
        h: HAlign::Left,
        v: VAlign::Middle,
    };
    pub const MIDDLE_RIGHT: Self = Self {
        h: HAlign::Right,
        v: VAlign::Middle,
    };
}

/// Masque alpha d'une ligne de texte rasterisée.
pub struct TextMask {
    pub width: u32,
    pub height: u32,
    /// Couverture [0, 255], row-major.
    pub alpha: Vec<u8>,
}

/// Police chargée (ou absente) et opérations de texte.
///
/// Sans police, `measure` renvoie une estimation et `draw` ne trace rien :
/// la mise en page reste identique, seuls les libellés manquent.
///
/// # Example
/// ```
/// use uc_render::text::Typeface;
/// let face = Typeface::none();
/// assert!(!face.is_available());
/// let (w, h) = face.measure("UC1", 10.0);
/// assert!(w > 0.0 && h > 0.0);
/// ```
pub struct Typeface {
    font: Option<FontVec>,
    source: Option<PathBuf>,
}

impl Typeface {
    /// Typeface without glyphs.
    #[must_use]
    pub fn none() -> Self {
        Self {
            font: None,
            source: None,
        }
    }

    /// Charge la police demandée, sinon la première police système trouvée.
    ///
    /// Une police explicite illisible est une erreur ; l'absence de police
    /// système ne l'est pas (warning, texte omis).
    ///
    /// # Errors
    /// `RenderError::Font` si `explicit` est fourni mais inutilisable.
    pub fn load(explicit: Option<&Path>) -> Result<Self, RenderError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        for candidate in SYSTEM_FONTS {
            let path = Path::new(candidate);
            if path.is_file() {
                match Self::from_file(path) {
                    Ok(face) => return Ok(face),
                    Err(e) => log::debug!("Police ignorée : {e}"),
                }
            }
        }
        log::warn!("Aucune police système trouvée : les libellés seront omis (voir render.font_path)");
        Ok(Self::none())
    }

    /// Load a TrueType/OpenType file.
    ///
    /// # Errors
    /// `RenderError::Font` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        let font_error = |reason: String| RenderError::Font {
            path: path.display().to_string(),
            reason,
        };
        let data = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
        let font = FontVec::try_from_vec(data).map_err(|e| font_error(e.to_string()))?;
        log::info!("Police chargée : {}", path.display());
        Ok(Self {
            font: Some(font),
            source: Some(path.to_path_buf()),
        })
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Chemin de la police chargée.
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Taille (largeur, hauteur) d'une ligne de texte en pixels, non tournée.
    #[must_use]
    pub fn measure(&self, text: &str, px: f32) -> (f32, f32) {
        match &self.font {
            Some(font) => {
                let scaled = font.as_scaled(PxScale::from(px));
                let mut caret = 0.0;
                let mut last = None;
                for ch in text.chars() {
                    let id = scaled.glyph_id(ch);
                    if let Some(prev) = last {
                        caret += scaled.kern(prev, id);
                    }
                    caret += scaled.h_advance(id);
                    last = Some(id);
                }
                (caret, scaled.ascent() - scaled.descent())
            }
            None => (
                text.chars().count() as f32 * px * ESTIMATED_ADVANCE,
                px * ESTIMATED_LINE,
            ),
        }
    }

    /// Rasterise une ligne de texte. `None` sans police ou texte vide.
    #[must_use]
    pub fn rasterize(&self, text: &str, px: f32) -> Option<TextMask> {
        let font = self.font.as_ref()?;
        if text.is_empty() {
            return None;
        }
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let (w, h) = self.measure(text, px);
        let width = w.ceil().max(1.0) as u32 + 2;
        let height = h.ceil().max(1.0) as u32;
        let mut alpha = vec![0u8; (width * height) as usize];

        let mut caret = 1.0;
        let mut last = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = last {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, ascent));
            caret += scaled.h_advance(id);
            last = Some(id);

            if let Some(outline) = font.outline_glyph(glyph) {
                let bounds = outline.px_bounds();
                outline.draw(|x, y, v| {
                    let gx = i64::from(x) + bounds.min.x as i64;
                    let gy = i64::from(y) + bounds.min.y as i64;
                    if gx >= 0 && gy >= 0 && gx < i64::from(width) && gy < i64::from(height) {
                        let idx = (gy * i64::from(width) + gx) as usize;
                        let cov = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                        alpha[idx] = alpha[idx].max(cov);
                    }
                });
            }
        }

        Some(TextMask {
            width,
            height,
            alpha,
        })
    }

    /// Trace `text` ancré en (`x`, `y`), tourné de `angle_deg` (sens trigonométrique).
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        fb: &mut FrameBuffer,
        text: &str,
        px: f32,
        x: f32,
        y: f32,
        anchor: Anchor,
        angle_deg: f32,
        color: Rgb,
    ) {
        if let Some(mask) = self.rasterize(text, px) {
            blit_rotated(fb, &mask, x, y, anchor, angle_deg, color);
        }
    }
}

/// Pose un masque sur l'image : le point `anchor` du masque arrive en (`x`, `y`),
/// puis rotation autour de ce point. Échantillonnage au plus proche voisin.
pub fn blit_rotated(
    fb: &mut FrameBuffer,
    mask: &TextMask,
    x: f32,
    y: f32,
    anchor: Anchor,
    angle_deg: f32,
    color: Rgb,
) {
    let (mw, mh) = (mask.width as f32, mask.height as f32);
    let ax = match anchor.h {
        HAlign::Left => 0.0,
        HAlign::Center => mw / 2.0,
        HAlign::Right => mw,
    };
    let ay = match anchor.v {
        VAlign::Top => 0.0,
        VAlign::Middle => mh / 2.0,
        VAlign::Bottom => mh,
    };
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    // Écran : y vers le bas, donc rotation trigonométrique visuelle :
    // x' = dx·cos + dy·sin ; y' = −dx·sin + dy·cos
    let forward = |dx: f32, dy: f32| (x + dx * cos + dy * sin, y - dx * sin + dy * cos);
    let corners = [
        forward(-ax, -ay),
        forward(mw - ax, -ay),
        forward(-ax, mh - ay),
        forward(mw - ax, mh - ay),
    ];
    let min_x = corners.iter().map(|c| c.0).fold(f32::INFINITY, f32::min).floor() as i64;
    let max_x = corners.iter().map(|c| c.0).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;
    let min_y = corners.iter().map(|c| c.1).fold(f32::INFINITY, f32::min).floor() as i64;
    let max_y = corners.iter().map(|c| c.1).fold(f32::NEG_INFINITY, f32::max).ceil() as i64;

    for py in min_y..max_y {
        for px in min_x..max_x {
            let ox = px as f32 + 0.5 - x;
            let oy = py as f32 + 0.5 - y;
            // Rotation inverse vers les coordonnées du masque.
            let mx = ox * cos - oy * sin + ax;
            let my = ox * sin + oy * cos + ay;
            if mx < 0.0 || my < 0.0 || mx >= mw || my >= mh {
                continue;
            }
            let idx = my as usize * mask.width as usize + mx as usize;
            fb.blend(px, py, color, mask.alpha[idx]);
        }
    }
}
