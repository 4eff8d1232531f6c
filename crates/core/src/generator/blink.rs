use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::{FrameBuffer, GridSpec};
use crate::generator::{Generator, ModeParams};
use crate::math::normalized_sin;

/// Threshold on the raw sinusoid below which the blink counts as "lights
/// out" and may pick a new random color.
const TROUGH: f32 = -0.99;

/// Whole-panel blink: every cell follows one sinusoid of `t * speed`.
#[derive(Debug)]
pub struct Blink {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
}

impl Blink {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(1.0, 15.0),
            rng,
        }
    }
}

impl Generator for Blink {
    fn name(&self) -> &'static str {
        "Monotone Blinking"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let phase = t * self.params.scaled_speed();
        // Recolor while the panel is dark so the switch is invisible.
        if phase.sin() < TROUGH {
            self.params.maybe_randomize_color(&mut self.rng);
        }

        let mut frame = self.grid.blank_frame();
        frame.fill(self.params.light(normalized_sin(phase)));
        frame
    }
}
