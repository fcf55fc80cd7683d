/// Linear premultiplied RGBA color.
///
/// Invariant: `r`, `g`, `b` are already multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);

    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    /// Fully opaque color; premultiplication is a no-op at `a == 1`.
    #[inline]
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a premultiplied color from premultiplied components.
    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a premultiplied color from straight-alpha components in `[0, 1]`.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// Creates a premultiplied color from straight 8-bit channels.
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// Returns straight-alpha components. For `a == 0`, RGB is 0.
    #[inline]
    pub fn to_straight(self) -> (f32, f32, f32, f32) {
        if self.a <= 0.0 {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            let inv = 1.0 / self.a;
            (self.r * inv, self.g * inv, self.b * inv, self.a)
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_is_premultiplied() {
        let c = Color::from_straight(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
    }

    #[test]
    fn straight_round_trips_through_premul() {
        let (r, g, b, a) = Color::from_straight(0.2, 0.4, 0.8, 0.5).to_straight();
        assert!((r - 0.2).abs() < 1e-6 && (g - 0.4).abs() < 1e-6 && (b - 0.8).abs() < 1e-6);
        assert_eq!(a, 0.5);
    }

    #[test]
    fn transparent_to_straight_is_zero() {
        assert_eq!(Color::transparent().to_straight(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let c = Color::from_straight(2.0, -1.0, 0.5, 3.0);
        assert_eq!(c, Color::from_premul(1.0, 0.0, 0.5, 1.0));
    }

    #[test]
    fn black_clears_to_opaque_black() {
        let w = Color::BLACK.to_wgpu();
        assert_eq!((w.r, w.g, w.b, w.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn from_u8_full_alpha() {
        let c = Color::from_srgb_u8(255, 0, 255, 255);
        assert_eq!(c.to_array(), [1.0, 0.0, 1.0, 1.0]);
    }
}
