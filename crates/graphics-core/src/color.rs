// File: crates/graphics-core/src/color.rs
// Summary: Colors produced by RGBColor/Hue directives, CSS rendering and RGBA conversion.

use std::fmt;

use crate::error::{GraphicsError, Result};

#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// CSS keyword, e.g. "black".
    Named(String),
    /// Channels in 0..=255.
    Rgb(f64, f64, f64),
    /// Hue in degrees, saturation and lightness in percent.
    Hsl(f64, f64, f64),
}

impl Color {
    pub fn black() -> Self {
        Color::Named("black".into())
    }

    /// `RGBColor[r, g, b]` with channels in `[0, 1]`.
    pub fn from_rgb_channels(channels: &[f64]) -> Result<Self> {
        match channels {
            [r, g, b] => Ok(Color::Rgb(255.0 * r, 255.0 * g, 255.0 * b)),
            _ => Err(GraphicsError::ColorArity { head: "RGBColor", got: channels.len() }),
        }
    }

    /// `Hue[h, s, b]` with components in `[0, 1]`.
    pub fn from_hue(channels: &[f64]) -> Result<Self> {
        match channels {
            [h, s, l] => Ok(Color::Hsl(359.0 * h, 100.0 * s, 100.0 * l)),
            _ => Err(GraphicsError::ColorArity { head: "Hue", got: channels.len() }),
        }
    }

    /// 8-bit RGBA for rasterizing backends. Unknown names fall back to black.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        match self {
            Color::Rgb(r, g, b) => [q(*r), q(*g), q(*b), 255],
            Color::Hsl(h, s, l) => {
                let (r, g, b) = hsl_to_rgb(*h, s / 100.0, l / 100.0);
                [q(r * 255.0), q(g * 255.0), q(b * 255.0), 255]
            }
            Color::Named(name) => match name.to_ascii_lowercase().as_str() {
                "white" => [255, 255, 255, 255],
                "red" => [255, 0, 0, 255],
                "green" => [0, 128, 0, 255],
                "blue" => [0, 0, 255, 255],
                "gray" | "grey" => [128, 128, 128, 255],
                "none" | "transparent" => [0, 0, 0, 0],
                _ => [0, 0, 0, 255],
            },
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Named(name) => f.write_str(name),
            Color::Rgb(r, g, b) => write!(f, "rgb({},{},{})", r, g, b),
            Color::Hsl(h, s, l) => write!(f, "hsl({},{}%,{}%)", h, s, l),
        }
    }
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (f64, f64, f64) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    (r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_requires_three_channels() {
        let red = Color::from_rgb_channels(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(red.to_string(), "rgb(255,0,0)");
        assert_eq!(red.to_rgba8(), [255, 0, 0, 255]);
        assert!(matches!(
            Color::from_rgb_channels(&[1.0, 0.0]),
            Err(GraphicsError::ColorArity { head: "RGBColor", got: 2 })
        ));
        assert!(Color::from_hue(&[0.5]).is_err());
    }

    #[test]
    fn hue_converts_to_rgba() {
        let c = Color::from_hue(&[0.0, 1.0, 0.5]).unwrap();
        assert_eq!(c.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(c.to_string(), "hsl(0,100%,50%)");
    }
}
