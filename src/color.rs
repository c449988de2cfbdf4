use anyhow::{anyhow, Context};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// RGB in `0..=1`, taken as written in hex or CSS. There is no colour management: shading
/// works on these values and they reach the canvas unconverted.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a `0xRRGGBB` integer.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Parses `#rrggbb` or `#rgb`.
    pub fn from_css(css: &str) -> anyhow::Result<Self> {
        let digits = css
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("Colour must start with '#': {css}"))?;

        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(anyhow!("Unsupported colour format: {css}")),
        };

        let hex = u32::from_str_radix(&expanded, 16)
            .with_context(|| format!("Invalid hex digits in colour: {css}"))?;

        Ok(Self::from_hex(hex))
    }

    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }

    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_white_and_black_are_exact() {
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
        assert_eq!(Color::from_hex(0x000000), Color::rgb(0.0, 0.0, 0.0));
    }

    #[test]
    fn hex_channels_are_not_linearised() {
        let grey = Color::from_hex(0x808080);
        assert_eq!(grey.r, 128.0 / 255.0);

        let teal = Color::from_hex(0x009f8c);
        assert_eq!(teal.to_vec3(), Vec3::new(0.0, 159.0 / 255.0, 140.0 / 255.0));
    }

    #[test]
    fn css_matches_hex() {
        let css = Color::from_css("#009f8c").unwrap();
        let hex = Color::from_hex(0x009f8c);
        assert_eq!(css, hex);
        assert_eq!(css.r, 0.0);
        assert!(css.g > css.b);
    }

    #[test]
    fn css_short_form_expands() {
        assert_eq!(
            Color::from_css("#fff").unwrap(),
            Color::from_css("#ffffff").unwrap()
        );
    }

    #[test]
    fn css_rejects_garbage() {
        assert!(Color::from_css("009f8c").is_err());
        assert!(Color::from_css("#12345").is_err());
        assert!(Color::from_css("#gggggg").is_err());
    }
}
