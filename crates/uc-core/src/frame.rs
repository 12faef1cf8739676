use crate::color::Rgb;
use crate::error::CoreError;

/// Côté maximal accepté pour une image (pixels).
pub const MAX_SIDE: u32 = 16_384;

/// Buffer de pixels RGBA row-major, 4 bytes par pixel.
///
/// # Example
/// ```
/// use uc_core::color::Rgb;
/// use uc_core::frame::FrameBuffer;
/// let fb = FrameBuffer::filled(10, 10, Rgb::WHITE).unwrap();
/// assert_eq!(fb.data.len(), 400);
/// assert_eq!(fb.pixel(3, 3), Some(Rgb::WHITE));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer opaque rempli de `background`.
    ///
    /// # Errors
    /// `CoreError::InvalidDimensions` si une dimension est nulle ou dépasse `MAX_SIDE`.
    pub fn filled(width: u32, height: u32, background: Rgb) -> Result<Self, CoreError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let data = background.rgba().repeat(width as usize * height as usize);
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Couleur du pixel (x, y), `None` hors image.
    #[inline]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.offset(x, y);
        Some(Rgb(self.data[idx], self.data[idx + 1], self.data[idx + 2]))
    }

    /// Écrit un pixel opaque. Hors image : ignoré.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if let Some(idx) = self.checked_offset(x, y) {
            self.data[idx..idx + 4].copy_from_slice(&color.rgba());
        }
    }

    /// Mélange `color` sur le pixel existant avec une couverture `alpha` ∈ [0, 255].
    #[inline]
    pub fn blend(&mut self, x: i64, y: i64, color: Rgb, alpha: u8) {
        let Some(idx) = self.checked_offset(x, y) else {
            return;
        };
        match alpha {
            0 => {}
            255 => self.data[idx..idx + 4].copy_from_slice(&color.rgba()),
            a => {
                let a = u16::from(a);
                let mix = |dst: u8, src: u8| -> u8 {
                    ((u16::from(src) * a + u16::from(dst) * (255 - a) + 127) / 255) as u8
                };
                self.data[idx] = mix(self.data[idx], color.0);
                self.data[idx + 1] = mix(self.data[idx + 1], color.1);
                self.data[idx + 2] = mix(self.data[idx + 2], color.2);
                self.data[idx + 3] = 255;
            }
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }

    #[inline]
    fn checked_offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(self.offset(x as u32, y as u32))
    }
}
