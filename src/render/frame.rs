/// A rendered frame as RGBA8 pixels.
///
/// Frames come out of the rasterizer premultiplied; the flag makes that explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert to straight alpha, as image encoders expect.
    pub fn to_straight(&self) -> FrameRGBA {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = px[3];
            if a == 0 {
                px[..3].fill(0);
                continue;
            }
            if a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                let v = (u32::from(*c) * 255 + u32::from(a) / 2) / u32::from(a);
                *c = v.min(255) as u8;
            }
        }
        FrameRGBA {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Rasterizer settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// If set, the target is cleared to this RGBA8 colour (straight alpha) before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Load the system font database so legend text resolves.
    pub system_fonts: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_rgba: Some([255, 255, 255, 255]),
            system_fonts: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
