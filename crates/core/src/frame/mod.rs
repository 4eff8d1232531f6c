use serde::{Deserialize, Serialize};

use crate::math::clip_intensity;

/// Plain 8-bit RGB color triple in logical (r, g, b) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const YELLOW: Self = Self::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A single cell of the panel: a color plus an intensity in `[0, 1]`.
///
/// Values are replaced wholesale, never channel-by-channel, so a cell can
/// never end up with a stale intensity paired with a fresh color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightValue {
    pub color: Rgb,
    pub intensity: f32,
}

impl LightValue {
    pub const OFF: Self = Self {
        color: Rgb::BLACK,
        intensity: 0.0,
    };

    /// Builds a cell value, clipping the intensity into `[0, 1]`.
    pub fn new(color: Rgb, intensity: f32) -> Self {
        Self {
            color,
            intensity: clip_intensity(intensity),
        }
    }

    /// Returns a copy with the intensity scaled by `factor` and clipped.
    /// This is the brightness pass applied by the controller each tick.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.color, self.intensity * factor)
    }
}

/// Geometry of the logical panel plus the scheduler's fixed timestep.
///
/// Generators receive a copy at construction time; the dimensions stay
/// fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub width: usize,
    pub height: usize,
    pub dt: f32,
}

impl GridSpec {
    pub fn new(width: usize, height: usize, dt: f32) -> Self {
        Self { width, height, dt }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Maps a grid cell to a centered coordinate in roughly `[-0.5, 0.5]^2`.
    pub fn normalize(&self, x: usize, y: usize) -> (f32, f32) {
        let x_n = (x as f32 - self.width as f32 / 2.0) / self.width as f32;
        let y_n = (y as f32 - self.height as f32 / 2.0) / self.height as f32;
        (x_n, y_n)
    }

    /// Scalar index of a cell, used by the sweep-style generators to order
    /// cells along the strip.
    pub fn cell_index(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }

    pub fn blank_frame(&self) -> FrameBuffer {
        FrameBuffer::blank(self.width, self.height)
    }
}

/// Fixed-size 2-D grid of [`LightValue`], stored column-major so that a
/// whole wiring column can be borrowed as a slice.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<LightValue>,
}

impl FrameBuffer {
    /// Creates a buffer with every cell off. The buffer always holds
    /// exactly `width * height` entries.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![LightValue::OFF; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        x * self.height + y
    }

    pub fn get(&self, x: usize, y: usize) -> LightValue {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: LightValue) {
        let index = self.index(x, y);
        self.cells[index] = value;
    }

    pub fn fill(&mut self, value: LightValue) {
        self.cells.fill(value);
    }

    /// One physical wiring column, top to bottom in logical order.
    pub fn column(&self, x: usize) -> &[LightValue] {
        &self.cells[x * self.height..(x + 1) * self.height]
    }

    pub fn cells(&self) -> &[LightValue] {
        &self.cells
    }

    /// Multiplies every cell's intensity by `factor`, clipping to `[0, 1]`.
    pub fn scale_intensity(&mut self, factor: f32) {
        for cell in &mut self.cells {
            *cell = cell.scaled(factor);
        }
    }
}
