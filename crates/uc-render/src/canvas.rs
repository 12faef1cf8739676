use uc_core::color::Rgb;
use uc_core::frame::FrameBuffer;

/// Rectangle en pixels, coin haut-gauche + taille.
///
/// # Example
/// ```
/// use uc_render::canvas::Rect;
/// let r = Rect::new(10, 20, 30, 40);
/// assert_eq!(r.right(), 40);
/// assert_eq!(r.bottom(), 60);
/// assert_eq!(r.center(), (25, 40));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub w: i64,
    pub h: i64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub const fn right(&self) -> i64 {
        self.x + self.w
    }

    #[must_use]
    pub const fn bottom(&self) -> i64 {
        self.y + self.h
    }

    #[must_use]
    pub const fn center(&self) -> (i64, i64) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Motif des traits pointillés : `DASH_ON` pixels tracés, `DASH_OFF` sautés.
const DASH_ON: i64 = 4;
const DASH_OFF: i64 = 3;

/// Remplit `rect` (clippé à l'image).
pub fn fill_rect(fb: &mut FrameBuffer, rect: Rect, color: Rgb) {
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(i64::from(fb.width));
    let y1 = rect.bottom().min(i64::from(fb.height));
    for y in y0..y1 {
        for x in x0..x1 {
            fb.put(x, y, color);
        }
    }
}

/// Rectangle plein aux coins arrondis (rayon borné à la demi-hauteur).
pub fn fill_rounded_rect(fb: &mut FrameBuffer, rect: Rect, radius: i64, color: Rgb) {
    let radius = radius.clamp(0, rect.w.min(rect.h) / 2);
    if radius == 0 {
        fill_rect(fb, rect, color);
        return;
    }
    let r2 = radius * radius;
    for dy in 0..rect.h {
        for dx in 0..rect.w {
            // Distance au centre du coin le plus proche, si on est dans un coin.
            let cx = if dx < radius {
                radius - dx - 1
            } else if dx >= rect.w - radius {
                dx - (rect.w - radius)
            } else {
                -1
            };
            let cy = if dy < radius {
                radius - dy - 1
            } else if dy >= rect.h - radius {
                dy - (rect.h - radius)
            } else {
                -1
            };
            if cx >= 0 && cy >= 0 && cx * cx + cy * cy >= r2 {
                continue;
            }
            fb.put(rect.x + dx, rect.y + dy, color);
        }
    }
}

/// Contour d'épaisseur 1 pixel.
pub fn stroke_rect(fb: &mut FrameBuffer, rect: Rect, color: Rgb) {
    hline(fb, rect.x, rect.right(), rect.y, 1, color);
    hline(fb, rect.x, rect.right(), rect.bottom() - 1, 1, color);
    vline(fb, rect.x, rect.y, rect.bottom(), 1, color);
    vline(fb, rect.right() - 1, rect.y, rect.bottom(), 1, color);
}

/// Ligne horizontale pleine `[x0, x1)` centrée sur `y`.
pub fn hline(fb: &mut FrameBuffer, x0: i64, x1: i64, y: i64, thickness: i64, color: Rgb) {
    let top = y - thickness / 2;
    fill_rect(fb, Rect::new(x0, top, x1 - x0, thickness.max(1)), color);
}

/// Ligne verticale pleine `[y0, y1)` centrée sur `x`.
pub fn vline(fb: &mut FrameBuffer, x: i64, y0: i64, y1: i64, thickness: i64, color: Rgb) {
    let left = x - thickness / 2;
    fill_rect(fb, Rect::new(left, y0, thickness.max(1), y1 - y0), color);
}

/// Ligne horizontale pointillée d'un pixel.
pub fn dashed_hline(fb: &mut FrameBuffer, x0: i64, x1: i64, y: i64, color: Rgb) {
    for x in x0..x1 {
        if (x - x0) % (DASH_ON + DASH_OFF) < DASH_ON {
            fb.put(x, y, color);
        }
    }
}

/// Ligne verticale pointillée d'un pixel.
pub fn dashed_vline(fb: &mut FrameBuffer, x: i64, y0: i64, y1: i64, color: Rgb) {
    for y in y0..y1 {
        if (y - y0) % (DASH_ON + DASH_OFF) < DASH_ON {
            fb.put(x, y, color);
        }
    }
}
