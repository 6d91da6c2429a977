use std::fmt;

/// An sRGB color with an alpha channel, rendered as CSS `rgba(r, g, b, a)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same hue with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        Self { a, ..self }
    }

    pub fn same_hue(&self, other: &Rgba) -> bool {
        (self.r, self.g, self.b) == (other.r, other.g, other.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

const PALETTE: [Rgba; 10] = [
    Rgba::opaque(255, 99, 132),
    Rgba::opaque(54, 162, 235),
    Rgba::opaque(255, 206, 86),
    Rgba::opaque(75, 192, 192),
    Rgba::opaque(153, 102, 255),
    Rgba::opaque(255, 159, 64),
    Rgba::opaque(199, 199, 199),
    Rgba::opaque(83, 102, 255),
    Rgba::opaque(40, 159, 64),
    Rgba::opaque(210, 105, 30),
];

/// Number of distinct hues before colors repeat.
pub const PALETTE_SIZE: usize = PALETTE.len();

/// Line color of the savings series. Not part of the category palette.
pub const SAVINGS_COLOR: Rgba = Rgba::opaque(16, 185, 129);

/// Opaque color of the category series at `index`.
pub fn color_for(index: usize) -> Rgba {
    PALETTE[index % PALETTE_SIZE]
}

/// Color of the category series at `index` with the given alpha.
pub fn color_with_alpha(index: usize, alpha: f64) -> Rgba {
    color_for(index).with_alpha(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_repeats_every_ten() {
        for i in 0..25 {
            assert_eq!(color_for(i), color_for(i + PALETTE_SIZE));
        }
        assert_eq!(PALETTE_SIZE, 10);
    }

    #[test]
    fn test_palette_hues_are_distinct() {
        for (i, a) in PALETTE.iter().enumerate() {
            for b in PALETTE.iter().skip(i + 1) {
                assert!(!a.same_hue(b), "{} repeats", a);
            }
            assert!(!a.same_hue(&SAVINGS_COLOR));
        }
    }

    #[test]
    fn test_alpha_only_changes_alpha() {
        for i in 0..PALETTE_SIZE {
            let solid = color_for(i);
            let faded = color_with_alpha(i, 0.1);
            assert!(solid.same_hue(&faded));
            assert_eq!(solid.a, 1.0);
            assert_eq!(faded.a, 0.1);
        }
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(color_with_alpha(0, 2.5).a, 1.0);
        assert_eq!(color_with_alpha(0, -1.0).a, 0.0);
    }

    #[test]
    fn test_css_rendering() {
        assert_eq!(color_for(0).to_string(), "rgba(255, 99, 132, 1)");
        assert_eq!(color_with_alpha(1, 0.1).to_string(), "rgba(54, 162, 235, 0.1)");
    }
}
