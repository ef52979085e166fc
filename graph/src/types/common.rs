//! Common types used across descriptors.

/// 2D extent in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent2d {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Extent2d {
    /// Create a new 2D extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by the extent.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Reciprocal of the resolution, as passed to full-screen passes.
    pub fn reciprocal(&self) -> [f32; 2] {
        [
            1.0 / self.width.max(1) as f32,
            1.0 / self.height.max(1) as f32,
        ]
    }
}

impl Default for Extent2d {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}
