/// Owned pixel and depth storage for a raster layer

/// Row-major ARGB8888 pixels, `width * height` entries, never resized
#[derive(Debug, Clone)]
pub struct ColorBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Pixel at (x, y), `None` outside the buffer
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }
}

/// Closest depth written per pixel during one render pass.
///
/// Starts at `+inf` everywhere. Only lives for the duration of a pass.
#[derive(Debug)]
pub struct DepthBuffer {
    depths: Vec<f64>,
}

impl DepthBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            depths: vec![f64::INFINITY; len],
        }
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.depths.get(index).copied()
    }

    /// Record `depth` at `index` if it is at least as close as what is
    /// there. Returns whether the write happened.
    #[inline]
    pub fn test_and_set(&mut self, index: usize, depth: f64) -> bool {
        match self.depths.get_mut(index) {
            Some(current) if *current >= depth => {
                *current = depth;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_buffer_fill() {
        let mut buffer = ColorBuffer::new(4, 3, 0);
        assert_eq!(buffer.pixels().len(), 12);

        buffer.fill(0xFFABCDEF);
        assert!(buffer.pixels().iter().all(|&p| p == 0xFFABCDEF));
        assert_eq!(buffer.get(3, 2), Some(0xFFABCDEF));
        assert_eq!(buffer.get(4, 0), None);
        assert_eq!(buffer.get(0, 3), None);
    }

    #[test]
    fn test_depth_ties_overwrite() {
        let mut depth = DepthBuffer::new(2);
        assert_eq!(depth.get(0), Some(f64::INFINITY));

        assert!(depth.test_and_set(0, 5.0));
        assert!(depth.test_and_set(0, 5.0));
        assert!(!depth.test_and_set(0, 6.0));
        assert!(depth.test_and_set(0, 1.0));
        assert_eq!(depth.get(0), Some(1.0));
    }

    #[test]
    fn test_depth_out_of_range_is_ignored() {
        let mut depth = DepthBuffer::new(2);
        assert!(!depth.test_and_set(2, 0.0));
        assert_eq!(depth.len(), 2);
    }
}
