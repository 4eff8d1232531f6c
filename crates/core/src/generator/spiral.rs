use crate::frame::{FrameBuffer, GridSpec, Rgb};
use crate::generator::{Generator, ModeParams};
use crate::math::{clip_intensity, interp, length, polar_to_cart};

const RADIUS: f32 = 0.15;
const ANGULAR_SPEED: f32 = 0.5;
const RADIAL_SPEED: f32 = 0.007;
const RADIAL_BAND: f32 = 0.7;

/// A point orbits outward along a spiral, leaving a persistent trail in a
/// per-cell accumulation buffer. When the radial position wraps back to
/// the center the buffer is cleared so the trail does not smear across
/// the discontinuity.
#[derive(Debug)]
pub struct Spiral {
    grid: GridSpec,
    params: ModeParams,
    angle: f32,
    distance: f32,
    last_distance: f32,
    accumulated: Vec<f32>,
}

impl Spiral {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
            angle: 0.0,
            distance: 0.0,
            last_distance: 0.0,
            accumulated: vec![0.0; grid.cell_count()],
        }
    }
}

impl Generator for Spiral {
    fn name(&self) -> &'static str {
        "Spiral"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
        self.distance = (self.distance + RADIAL_SPEED) % RADIAL_BAND;
        self.angle = (self.angle + ANGULAR_SPEED) % std::f32::consts::TAU;
        let (x_p, y_p) = polar_to_cart(self.distance, self.angle);

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let distance = length(x_n - x_p, y_n - y_p);
                let slot = &mut self.accumulated[self.grid.cell_index(x, y)];
                *slot += interp(distance, &[0.0, 0.99 * RADIUS, RADIUS], &[1.0, 1.0, 0.0]);
                frame.set(x, y, self.params.light(clip_intensity(*slot)));
            }
        }

        if (self.last_distance - self.distance).abs() > 0.5 {
            self.accumulated.fill(0.0);
        }
        self.last_distance = self.distance;
        frame
    }
}
