use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::{FrameBuffer, GridSpec};
use crate::generator::{Generator, ModeParams};
use crate::math::{interp, length};

const MIN_RADIUS: f32 = 0.15;
const MAX_RADIUS: f32 = 0.5;

/// Filled circle that breathes between a minimum and maximum radius,
/// recoloring each time it collapses back to the minimum.
#[derive(Debug)]
pub struct Ring {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    radius: f32,
    contracting: bool,
}

impl Ring {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(0.25, 3.0),
            rng,
            radius: MIN_RADIUS,
            contracting: false,
        }
    }
}

impl Generator for Ring {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
        let step = self.params.scaled_speed() * self.grid.dt;
        if self.contracting {
            self.radius -= step;
        } else {
            self.radius += step;
        }

        if self.radius > MAX_RADIUS {
            self.contracting = true;
        } else if self.radius < MIN_RADIUS {
            self.contracting = false;
            self.params.maybe_randomize_color(&mut self.rng);
        }

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let distance = length(x_n, y_n);
                // Solid core with a soft band over the outer 15%.
                let intensity = interp(
                    distance,
                    &[0.0, 0.85 * self.radius, self.radius],
                    &[1.0, 1.0, 0.0],
                );
                frame.set(x, y, self.params.light(intensity));
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::new(14, 14, 1.0 / 60.0)
    }

    #[test]
    fn center_is_brightest() {
        let mut ring = Ring::seeded(grid(), 9);
        let frame = ring.generate(0.0, 0);
        let center = frame.get(7, 7).intensity;
        assert_eq!(center, 1.0);
        assert!(frame.get(0, 0).intensity <= center);
    }

    #[test]
    fn radius_breathes_within_bounds() {
        let mut ring = Ring::seeded(grid(), 9);
        ring.set_speed(1.0);
        let mut grew = false;
        let mut shrank = false;
        let mut last = ring.radius;
        for it in 0..2000 {
            ring.generate(it as f32 / 60.0, it);
            // One overshoot step past the bound is allowed before the
            // direction flips.
            assert!(ring.radius > MIN_RADIUS - 0.1 && ring.radius < MAX_RADIUS + 0.1);
            grew |= ring.radius > last;
            shrank |= ring.radius < last;
            last = ring.radius;
        }
        assert!(grew && shrank, "radius never reversed direction");
    }
}
