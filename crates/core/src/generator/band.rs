use crate::frame::{FrameBuffer, GridSpec, LightValue, Rgb};
use crate::generator::{Generator, ModeParams};

/// Rainbow palette, repeated along the strip.
const PALETTE: [Rgb; 6] = [
    Rgb::new(255, 0, 0),
    Rgb::new(255, 165, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(160, 32, 240),
];

/// Number of contiguous color segments the strip is partitioned into.
const SEGMENTS: usize = 18;

/// Cells are partitioned into contiguous index ranges, each painted from
/// the rainbow palette; the partition boundary rotates every tick.
#[derive(Debug)]
pub struct Band {
    grid: GridSpec,
    params: ModeParams,
    leadpoint: f32,
}

impl Band {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(0.1, 2.0),
            leadpoint: 0.0,
        }
    }
}

impl Generator for Band {
    fn name(&self) -> &'static str {
        "Colorful Line"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
        let total = self.grid.cell_count() as f32;
        self.leadpoint = (self.leadpoint + self.params.scaled_speed()) % total;

        let segment_len = (total / SEGMENTS as f32).ceil();
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let id = self.grid.cell_index(x, y) as f32;
                let segment = ((id + self.leadpoint) % total / segment_len) as usize;
                let color = PALETTE[segment % PALETTE.len()];
                frame.set(x, y, LightValue::new(color, 1.0));
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cell_wears_a_palette_color() {
        let mut band = Band::new(GridSpec::new(14, 14, 1.0 / 60.0));
        for it in 0..300 {
            let frame = band.generate(it as f32 / 60.0, it);
            for cell in frame.cells() {
                assert!(PALETTE.contains(&cell.color));
                assert_eq!(cell.intensity, 1.0);
            }
        }
    }

    #[test]
    fn boundary_rotates_over_time() {
        let mut band = Band::new(GridSpec::new(14, 14, 1.0 / 60.0));
        band.set_speed(1.0);
        let first = band.generate(0.0, 0);
        let mut changed = false;
        for it in 1..20 {
            if band.generate(it as f32 / 60.0, it) != first {
                changed = true;
                break;
            }
        }
        assert!(changed, "partition never moved");
    }
}
