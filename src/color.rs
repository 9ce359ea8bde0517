// src/color.rs

//! Defines the `Rgb` color type and the fixed palette used by the renderer.
//!
//! Colors are row-granular in this terminal: a whole content row shares one
//! foreground and one background color. There is no per-cell attribute model.

use serde::{Deserialize, Serialize};

/// An opaque sRGB color. Packs to `0xFF_RR_GG_BB` for the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Packs the color into the ARGB format expected by the output buffer.
    #[inline]
    pub fn to_argb(self) -> u32 {
        0xFF00_0000 | (u32::from(self.0) << 16) | (u32::from(self.1) << 8) | u32::from(self.2)
    }
}

/// The screen background: Commodore 64 blue.
pub const C64_BLUE: Rgb = Rgb(64, 49, 141);
/// The status bar background and cursor block color.
pub const C64_LIGHT_BLUE: Rgb = Rgb(96, 73, 211);
/// Default text color.
pub const C64_LIGHT_GRAY: Rgb = Rgb(202, 202, 202);
pub const C64_WHITE: Rgb = Rgb(255, 255, 255);
pub const C64_BLACK: Rgb = Rgb(0, 0, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_opaque_argb() {
        assert_eq!(Rgb(0, 0, 0).to_argb(), 0xFF000000);
        assert_eq!(Rgb(255, 255, 255).to_argb(), 0xFFFFFFFF);
        assert_eq!(Rgb(0x12, 0x34, 0x56).to_argb(), 0xFF123456);
    }
}
