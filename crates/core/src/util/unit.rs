use anyhow::{anyhow, Context};
use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign, Sum,
};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, ops};

/// A 2D point in screen space, in pixels. The origin is the top-left corner
/// of the viewport. Right is positive x, down is positive y.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linearly interpolate between two points. `0.0` gives `self`, `1.0`
    /// gives `other`. Values outside `[0, 1]` extrapolate.
    pub fn lerp(self, other: Self, fraction: f64) -> Self {
        Self {
            x: super::lerp(self.x, other.x, fraction),
            y: super::lerp(self.y, other.y, fraction),
        }
    }
}

impl From<nalgebra::Vector2<f64>> for Point2 {
    fn from(other: nalgebra::Vector2<f64>) -> Self {
        Self {
            x: other.x,
            y: other.y,
        }
    }
}

/// An offset in screen space, in pixels. See [Point2] for the axes.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Sum,
    Serialize,
    Deserialize,
)]
#[display(fmt = "<{}, {}>", "self.x", "self.y")]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl ops::Add<Vector2> for Point2 {
    type Output = Point2;

    fn add(self, rhs: Vector2) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl ops::Sub<Vector2> for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Vector2) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// An RGB color. Values are stored as floats between 0 and 1 (inclusive).
/// This uses f32 because the extra precision from f64 is pointless.
///
/// In config files, colors are written as HTML color codes (`#rrggbb`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color3 {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color3 {
    pub const WHITE: Self = Self::new_int(255, 255, 255);
    pub const BLACK: Self = Self::new_int(0, 0, 0);

    /// Create a new RGB color from integer components in the [0,255] range.
    pub const fn new_int(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
        }
    }

    /// Parse an HTML color code of the form `#rrggbb` (the `#` is optional)
    pub fn from_html(code: &str) -> anyhow::Result<Self> {
        let hex = code.strip_prefix('#').unwrap_or(code);
        // ASCII hex digits only, so the slices below land on char boundaries
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(anyhow!(
                "expected a color of the form #rrggbb, but got {:?}",
                code
            ));
        }
        let component = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("invalid color code {:?}", code))
        };
        Ok(Self::new_int(component(0)?, component(2)?, component(4)?))
    }

    /// Convert this number to a set of 3 bytes: `(red, green, blue)`
    pub fn to_ints(self) -> (u8, u8, u8) {
        (
            (self.red * 255.0).round() as u8,
            (self.green * 255.0).round() as u8,
            (self.blue * 255.0).round() as u8,
        )
    }

    /// Convert this color to an HTML color code: `#rrggbb`
    pub fn to_html(self) -> String {
        let (r, g, b) = self.to_ints();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Mix this color with another. A fraction of `0.0` is this color, `1.0`
    /// is the other one. The fraction is clamped to `[0, 1]`.
    pub fn blend(self, other: Self, fraction: f64) -> Self {
        let fraction = fraction.clamp(0.0, 1.0) as f32;
        let mix = |a: f32, b: f32| a + (b - a) * fraction;
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
        }
    }

    /// Lighten or darken this color. Positive brightness blends toward white,
    /// negative toward black. `scale` controls how strongly brightness
    /// affects this particular color.
    pub fn brighten(self, brightness: f64, scale: f64) -> Self {
        if brightness > 0.0 {
            self.blend(Self::WHITE, brightness * scale)
        } else if brightness < 0.0 {
            self.blend(Self::BLACK, -brightness * scale)
        } else {
            self
        }
    }
}

// Scale a color by a constant
impl ops::Mul<f32> for Color3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        // Clamping keeps every component in range, so the constructor check
        // can be skipped
        Self {
            red: (self.red * rhs).clamp(0.0, 1.0),
            green: (self.green * rhs).clamp(0.0, 1.0),
            blue: (self.blue * rhs).clamp(0.0, 1.0),
        }
    }
}

impl TryFrom<String> for Color3 {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_html(&value)
    }
}

impl From<Color3> for String {
    fn from(color: Color3) -> Self {
        color.to_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_html_codes() {
        let color = Color3::from_html("#40c0ff").unwrap();
        assert_eq!(color.to_ints(), (64, 192, 255));
        assert_eq!(color.to_html(), "#40c0ff");
        assert_eq!(Color3::from_html("000000").unwrap(), Color3::BLACK);

        assert!(Color3::from_html("#fff").is_err());
        assert!(Color3::from_html("#gg0000").is_err());
        assert!(Color3::from_html("+f+f+f").is_err());
    }

    #[test]
    fn test_html_codes_multibyte() {
        // Six bytes, but only four characters
        let error = Color3::from_html("aéé1").unwrap_err();
        assert_eq!(
            error.to_string(),
            "expected a color of the form #rrggbb, but got \"aéé1\""
        );
        assert!(Color3::from_html("#ffé0").is_err());
        assert!(serde_json::from_str::<Color3>(r#""aéé1""#).is_err());
    }

    #[test]
    fn test_brighten() {
        let base = Color3::new_int(100, 100, 100);
        assert_eq!(base.brighten(0.0, 1.0), base);
        assert_eq!(base.brighten(1.0, 1.0), Color3::WHITE);
        assert_eq!(base.brighten(-1.0, 1.0), Color3::BLACK);

        // Half way to white, scaled down by half again
        let lighter = base.brighten(0.5, 0.5);
        let expected = 100.0 / 255.0 + (1.0 - 100.0 / 255.0) * 0.25;
        assert_approx_eq!(lighter.red, expected, 1e-6);
    }

    #[test]
    fn test_point_lerp() {
        let a = Point2::new(0.0, 10.0);
        let b = Point2::new(100.0, 20.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.25), Point2::new(25.0, 12.5));
    }
}
