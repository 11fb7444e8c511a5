/// Simple RGB colour stored as 8-bit channels.
///
/// Layer transforms take and return values of this type; the core never
/// inspects channels itself beyond the invert helper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Construct from 0-255 channel values.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Solid white convenience colour, the default canvas background.
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Solid black convenience colour.
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Channel-wise inverse.
    pub fn invert(self) -> Self {
        Self::rgb(255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Add a signed delta to every channel, saturating at the bounds.
    pub fn shift(self, delta: i16) -> Self {
        let clamp = |c: u8| (c as i16 + delta).clamp(0, 255) as u8;
        Self::rgb(clamp(self.r), clamp(self.g), clamp(self.b))
    }
}
