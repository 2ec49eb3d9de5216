/// An RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Default presentation color for objects without an override.
    pub const BLUE: Self = Self::new(0.3, 0.3, 1.0, 1.0);
    pub const LIGHT_BLUE: Self = Self::new(0.7, 0.7, 1.0, 1.0);
    pub const RED: Self = Self::new(1.0, 0.3, 0.3, 1.0);

    /// Creates a color. Components are not clamped; use [`Color::clamped`] for untrusted input.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color with every component clamped into `[0, 1]` (NaN becomes 0).
    #[must_use]
    pub fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        let c = |x: f32| if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) };
        Self::new(c(r), c(g), c(b), c(a))
    }

    /// Builds a color from 8-bit channels.
    #[must_use]
    pub fn from_rgba8(rgba: [u8; 4]) -> Self {
        let c = |x: u8| f32::from(x) / 255.0;
        Self::new(c(rgba[0]), c(rgba[1]), c(rgba[2]), c(rgba[3]))
    }

    /// Converts to 8-bit channels, rounding to nearest.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b), c(self.a)]
    }

    /// Builds an opaque color from RGB percentages in `[0, 100]`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_percent_rgb(rgb: [f64; 3]) -> Self {
        let c = |x: f64| (x / 100.0) as f32;
        Self::clamped(c(rgb[0]), c(rgb[1]), c(rgb[2]), 1.0)
    }

    /// Converts the RGB channels to percentages in `[0, 100]`.
    #[must_use]
    pub fn to_percent_rgb(self) -> [f64; 3] {
        let c = |x: f32| f64::from(x) * 100.0;
        [c(self.r), c(self.g), c(self.b)]
    }
}
