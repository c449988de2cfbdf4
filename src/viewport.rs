use winit::dpi::PhysicalSize;

/// Drawable size in physical pixels, shared by the camera projection and the render surface.
/// Neither side is ever zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Zero sides (hidden canvas, minimised window) become one pixel.
    pub fn clamped(size: PhysicalSize<u32>) -> Self {
        Self {
            width: size.width.max(1),
            height: size.height.max(1),
        }
    }

    /// The viewport after a resize to `size`. A zero-sized request keeps the current one.
    pub fn resized(self, size: PhysicalSize<u32>) -> Self {
        if size.width == 0 || size.height == 0 {
            return self;
        }

        Self::clamped(size)
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_never_returns_zero() {
        let viewport = Viewport::clamped(PhysicalSize::new(0, 0));

        assert_eq!((viewport.width(), viewport.height()), (1, 1));
        assert_eq!(viewport.aspect(), 1.0);
    }

    #[test]
    fn zero_sized_resize_keeps_previous() {
        let viewport = Viewport::clamped(PhysicalSize::new(800, 600));

        assert_eq!(viewport.resized(PhysicalSize::new(0, 600)), viewport);
        assert_eq!(viewport.resized(PhysicalSize::new(800, 0)), viewport);
    }

    #[test]
    fn resize_takes_new_size() {
        let viewport = Viewport::clamped(PhysicalSize::new(800, 600))
            .resized(PhysicalSize::new(1920, 1080));

        assert_eq!((viewport.width(), viewport.height()), (1920, 1080));
        assert!((viewport.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }
}
