/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False for zero-sized (minimized) or non-finite viewports.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height, or `None` when the viewport is not drawable.
    #[inline]
    pub fn aspect(self) -> Option<f32> {
        self.is_valid().then(|| self.width / self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimized_viewport_is_invalid() {
        assert!(!Viewport::new(0.0, 600.0).is_valid());
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), None);
    }

    #[test]
    fn aspect_of_default_window() {
        let a = Viewport::new(800.0, 600.0).aspect().unwrap();
        assert!((a - 4.0 / 3.0).abs() < 1e-6);
    }
}
