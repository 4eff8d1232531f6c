use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::{FrameBuffer, GridSpec, Rgb};
use crate::generator::{Generator, ModeParams};
use crate::math::{interp, length, normalize_vec, reflect};

const RADIUS: f32 = 0.15;
const SPEED: f32 = 1.0;
const BOUND: f32 = 0.5;

/// A soft disk travelling at constant velocity inside the unit square,
/// mirror-reflecting off the walls.
#[derive(Debug)]
pub struct Bounce {
    grid: GridSpec,
    params: ModeParams,
    position: (f32, f32),
    direction: (f32, f32),
}

impl Bounce {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, mut rng: StdRng) -> Self {
        // Biased away from zero so the start direction is never degenerate.
        let direction = normalize_vec(rng.gen::<f32>() + 0.1, rng.gen::<f32>() + 0.1);
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
            position: (0.0, 0.0),
            direction,
        }
    }
}

impl Generator for Bounce {
    fn name(&self) -> &'static str {
        "DVD"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
        let step = SPEED * self.grid.dt;
        self.position.0 += step * self.direction.0;
        self.position.1 += step * self.direction.1;

        if self.position.0 > BOUND {
            self.direction = reflect(self.direction, (-1.0, 0.0));
        } else if self.position.0 < -BOUND {
            self.direction = reflect(self.direction, (1.0, 0.0));
        } else if self.position.1 > BOUND {
            self.direction = reflect(self.direction, (0.0, -1.0));
        } else if self.position.1 < -BOUND {
            self.direction = reflect(self.direction, (0.0, 1.0));
        }
        // Pull the point back inside so it cannot tunnel through a wall
        // and keep reflecting forever.
        self.position.0 = self.position.0.clamp(-BOUND, BOUND);
        self.position.1 = self.position.1.clamp(-BOUND, BOUND);

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let distance = length(self.position.0 - x_n, self.position.1 - y_n);
                let intensity = interp(distance, &[0.0, 0.95 * RADIUS, RADIUS], &[1.0, 1.0, 0.0]);
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
    fn right_wall_flips_horizontal_component_only() {
        let mut bounce = Bounce::seeded(grid(), 2);
        bounce.position = (0.5, 0.0);
        bounce.direction = (0.8, 0.6);

        bounce.generate(0.0, 0);
        assert!((bounce.direction.0 + 0.8).abs() < 1e-6);
        assert!((bounce.direction.1 - 0.6).abs() < 1e-6);
    }

    #[test]
    fn point_stays_inside_the_unit_square() {
        let mut bounce = Bounce::seeded(grid(), 2);
        for it in 0..3000 {
            bounce.generate(it as f32 / 60.0, it);
            assert!(bounce.position.0.abs() <= BOUND + 1e-6);
            assert!(bounce.position.1.abs() <= BOUND + 1e-6);
        }
    }

    #[test]
    fn disk_lights_the_cell_under_the_point() {
        let mut bounce = Bounce::seeded(grid(), 2);
        bounce.position = (0.0, 0.0);
        bounce.direction = (0.0, 0.0);
        let frame = bounce.generate(0.0, 0);
        assert_eq!(frame.get(7, 7).intensity, 1.0);
        assert_eq!(frame.get(0, 0).intensity, 0.0);
    }
}
