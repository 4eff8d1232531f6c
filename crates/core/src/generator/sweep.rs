//! Leading-point sweeps: a scalar position advances along the strip order
//! each tick and a window of cells behind it lights up.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::{FrameBuffer, GridSpec};
use crate::generator::{Generator, ModeParams};

const MIN_SPEED: f32 = 0.1;
const MAX_SPEED: f32 = 2.0;
const LINE_WINDOW: f32 = 5.0;

fn render_window(
    grid: &GridSpec,
    params: &ModeParams,
    leadpoint: f32,
    window: f32,
) -> FrameBuffer {
    let mut frame = grid.blank_frame();
    for x in 0..grid.width {
        for y in 0..grid.height {
            let id = grid.cell_index(x, y) as f32;
            let behind = leadpoint - id;
            let lit = behind > 0.0 && behind < window;
            frame.set(x, y, params.light(if lit { 1.0 } else { 0.0 }));
        }
    }
    frame
}

/// Wide sweep: half of a double-length cycle is lit, so the band fills
/// the whole panel before draining again.
#[derive(Debug)]
pub struct Sweep {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    leadpoint: f32,
}

impl Sweep {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(MIN_SPEED, MAX_SPEED),
            rng,
            leadpoint: 0.0,
        }
    }
}

impl Generator for Sweep {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, it: u64) -> FrameBuffer {
        let cycle = 2 * self.grid.cell_count();
        if it % cycle as u64 == 0 {
            self.params.maybe_randomize_color(&mut self.rng);
        }

        self.leadpoint = (self.leadpoint + self.params.scaled_speed()) % cycle as f32;
        render_window(
            &self.grid,
            &self.params,
            self.leadpoint,
            self.grid.cell_count() as f32,
        )
    }
}

/// Narrow sweep: a five-cell band chases around the strip, recoloring
/// each time the leading point wraps back to the start.
#[derive(Debug)]
pub struct Line {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    leadpoint: f32,
}

impl Line {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(MIN_SPEED, MAX_SPEED),
            rng,
            leadpoint: 0.0,
        }
    }
}

impl Generator for Line {
    fn name(&self) -> &'static str {
        "Line"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
        let cycle = self.grid.cell_count() as f32;
        let advanced = self.leadpoint + self.params.scaled_speed();
        if advanced >= cycle {
            self.params.maybe_randomize_color(&mut self.rng);
        }
        self.leadpoint = advanced % cycle;

        render_window(&self.grid, &self.params, self.leadpoint, LINE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridSpec {
        GridSpec::new(14, 14, 1.0 / 60.0)
    }

    fn lit_count(frame: &FrameBuffer) -> usize {
        frame
            .cells()
            .iter()
            .filter(|cell| cell.intensity > 0.0)
            .count()
    }

    #[test]
    fn line_window_stays_narrow() {
        let mut line = Line::seeded(grid(), 5);
        line.set_speed(1.0);
        for it in 0..400 {
            let frame = line.generate(it as f32 / 60.0, it);
            assert!(lit_count(&frame) <= 5, "window grew past five cells");
        }
    }

    #[test]
    fn line_advances_each_tick() {
        let mut line = Line::seeded(grid(), 5);
        line.set_speed(0.0);

        line.generate(0.0, 0);
        let first = line.leadpoint;
        line.generate(1.0 / 60.0, 1);
        assert!((line.leadpoint - first - MIN_SPEED).abs() < 1e-6);
    }

    #[test]
    fn sweep_fills_and_drains() {
        let mut sweep = Sweep::seeded(grid(), 5);
        sweep.set_speed(1.0);

        let mut saw_full = false;
        let mut saw_dark = false;
        for it in 0..1200 {
            let frame = sweep.generate(it as f32 / 60.0, it);
            let lit = lit_count(&frame);
            assert!(lit <= grid().cell_count());
            saw_full |= lit == grid().cell_count() - 1 || lit == grid().cell_count();
            saw_dark |= lit == 0;
        }
        assert!(saw_full, "sweep never filled the panel");
        assert!(saw_dark, "sweep never drained");
    }

    #[test]
    fn leadpoint_wraps_within_cycle() {
        let mut sweep = Sweep::seeded(grid(), 5);
        sweep.set_speed(1.0);
        for it in 0..2000 {
            sweep.generate(it as f32 / 60.0, it);
            assert!(sweep.leadpoint < 2.0 * grid().cell_count() as f32);
        }
    }
}
