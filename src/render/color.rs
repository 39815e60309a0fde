/// Linear RGB colour with components in 0-1
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0.0, g: 0.0, b: 0.0 };
    pub const WHITE: Rgb = Rgb { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// From a 0xRRGGBB literal
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// From HSL (hue: 0-360, saturation: 0-1, lightness: 0-1)
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let h = h.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Self::new(r + m, g + m, b + m)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_rgb(actual: Rgb, expected: Rgb) {
        assert!(
            (actual.r - expected.r).abs() < 0.002
                && (actual.g - expected.g).abs() < 0.002
                && (actual.b - expected.b).abs() < 0.002,
            "{:?} != {:?}",
            actual,
            expected
        );
    }

    #[test]
    fn test_from_hex() {
        assert_rgb(Rgb::from_hex(0xef4444), Rgb::new(239.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0));
        assert_eq!(Rgb::from_hex(0x000000), Rgb::BLACK);
        assert_eq!(Rgb::from_hex(0xffffff), Rgb::WHITE);
    }

    #[test]
    fn test_hsl_primaries() {
        assert_rgb(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0));
        assert_rgb(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0.0, 1.0, 0.0));
        assert_rgb(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0.0, 0.0, 1.0));
        assert_rgb(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_hsl_bark_brown() {
        // hsl(25, 50%, 50%) = #bf7540
        assert_rgb(Rgb::from_hsl(25.0, 0.5, 0.5), Rgb::from_hex(0xbf7540));
    }

    #[test]
    fn test_hsl_grey_when_unsaturated() {
        let grey = Rgb::from_hsl(25.0, 0.0, 0.3);
        assert!((grey.r - 0.3).abs() < 1e-6);
        assert_eq!(grey.r, grey.g);
        assert_eq!(grey.g, grey.b);
    }
}
