//! Colors, gradients and drawing modes understood by a [`Painter`](super::Painter).

use glam::Vec2;
use std::fmt;

/// A CSS color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba(u8, u8, u8, f32),
    /// Hue in degrees, saturation and lightness in percent.
    Hsla(f32, f32, f32, f32),
}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgba(r, g, b, 1.0)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Color::Rgba(r, g, b, a)
    }

    /// Same color with its alpha replaced.
    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Color::Rgba(r, g, b, _) => Color::Rgba(r, g, b, alpha),
            Color::Hsla(h, s, l, _) => Color::Hsla(h, s, l, alpha),
        }
    }

    pub fn alpha(&self) -> f32 {
        match *self {
            Color::Rgba(.., a) | Color::Hsla(.., a) => a,
        }
    }

    /// CSS text for `fillStyle`/`strokeStyle`.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba(r, g, b, a) if a >= 1.0 => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba(r, g, b, a) => write!(f, "rgba({},{},{},{})", r, g, b, a.max(0.0)),
            Color::Hsla(h, s, l, a) => write!(f, "hsla({}, {}%, {}%, {})", h, s, l, a.clamp(0.0, 1.0)),
        }
    }
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Two-stop linear gradient from `from` to `to`.
    Linear {
        from: Vec2,
        to: Vec2,
        start: Color,
        end: Color,
    },
    /// Two-stop radial gradient between two circles.
    Radial {
        inner: Vec2,
        inner_radius: f32,
        outer: Vec2,
        outer_radius: f32,
        start: Color,
        end: Color,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl Paint {
    /// Radial gradient sharing one center.
    pub fn radial(center: Vec2, inner_radius: f32, outer_radius: f32, start: Color, end: Color) -> Self {
        Paint::Radial {
            inner: center,
            inner_radius,
            outer: center,
            outer_radius,
            start,
            end,
        }
    }

    /// Vertical gradient from `y0` to `y1`.
    pub fn vertical(y0: f32, y1: f32, start: Color, end: Color) -> Self {
        Paint::Linear {
            from: Vec2::new(0.0, y0),
            to: Vec2::new(0.0, y1),
            start,
            end,
        }
    }
}

/// Compositing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Composite {
    #[default]
    SourceOver,
    /// Additive blending.
    Lighter,
}

impl Composite {
    pub fn css(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_text() {
        assert_eq!(Color::rgb(5, 6, 12).css(), "#05060c");
        assert_eq!(Color::rgba(139, 92, 246, 0.25).css(), "rgba(139,92,246,0.25)");
        assert_eq!(Color::Hsla(230.0, 90.0, 60.0, 0.5).css(), "hsla(230, 90%, 60%, 0.5)");
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::rgb(34, 211, 238).with_alpha(0.0);
        assert_eq!(c.alpha(), 0.0);
        assert_eq!(c.css(), "rgba(34,211,238,0)");
    }
}
