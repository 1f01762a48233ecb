use crate::math::edge_function;
use crate::vertex::Vertex;
use druid::Color;

/// RGBA pixel buffer with a depth buffer alongside
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
    depth: Vec<f64>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Framebuffer {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
            depth: vec![f64::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes, row by row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        Some((
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
            self.pixels[offset + 3],
        ))
    }

    /// Depth of the nearest surface drawn at a pixel (infinite if none)
    #[cfg(test)]
    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.depth[y * self.width + x])
    }

    /// Fills every pixel with `color` and resets the depth buffer
    pub fn clear(&mut self, color: &Color) {
        let (r, g, b, a) = color.as_rgba8();
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&[r, g, b, a]);
        }
        self.depth.fill(f64::INFINITY);
    }

    /// Fills a triangle of either winding, keeping the nearest surface per pixel
    pub fn fill_triangle(&mut self, v0: &Vertex, v1: &Vertex, v2: &Vertex, color: &Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let area = edge_function(&v0.screen_position, &v1.screen_position, &v2.screen_position);
        if area == 0.0 {
            return;
        }

        // Compute bounding box of the triangle
        let min_x = v0.screen_position[0]
            .min(v1.screen_position[0])
            .min(v2.screen_position[0])
            .floor()
            .max(0.0) as usize;
        let max_x = v0.screen_position[0]
            .max(v1.screen_position[0])
            .max(v2.screen_position[0])
            .ceil()
            .min(self.width as f64 - 1.0)
            .max(0.0) as usize;
        let min_y = v0.screen_position[1]
            .min(v1.screen_position[1])
            .min(v2.screen_position[1])
            .floor()
            .max(0.0) as usize;
        let max_y = v0.screen_position[1]
            .max(v1.screen_position[1])
            .max(v2.screen_position[1])
            .ceil()
            .min(self.height as f64 - 1.0)
            .max(0.0) as usize;

        let (r, g, b, a) = color.as_rgba8();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f64 + 0.5, y as f64 + 0.5];

                // Dividing by the signed area makes the weights winding-agnostic
                let w0 = edge_function(&v1.screen_position, &v2.screen_position, &p) / area;
                let w1 = edge_function(&v2.screen_position, &v0.screen_position, &p) / area;
                let w2 = edge_function(&v0.screen_position, &v1.screen_position, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                // 1/depth is linear in screen space under perspective
                let depth = 1.0 / (w0 / v0.depth() + w1 / v1.depth() + w2 / v2.depth());
                let offset = y * self.width + x;
                if depth < self.depth[offset] {
                    self.depth[offset] = depth;
                    self.pixels[offset * 4..offset * 4 + 4].copy_from_slice(&[r, g, b, a]);
                }
            }
        }
    }
}
