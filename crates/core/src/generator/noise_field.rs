//! Procedural-noise modes: organic shimmering driven by a coherent noise
//! field or by per-cell random phase coefficients.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::frame::{FrameBuffer, GridSpec, Rgb};
use crate::generator::{Generator, ModeParams};
use crate::math::noise::{gaussian, ValueNoise};
use crate::math::{clip_intensity, normalized_sin};

/// Smooth cloud-like flicker from a coherent value-noise field sampled
/// along a time-scaled trajectory per cell.
#[derive(Debug)]
pub struct Shimmer {
    grid: GridSpec,
    params: ModeParams,
    noise: ValueNoise,
}

impl Shimmer {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_seed(grid, rand::random())
    }

    pub fn with_seed(grid: GridSpec, seed: u32) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
            noise: ValueNoise::new(seed),
        }
    }
}

impl Generator for Shimmer {
    fn name(&self) -> &'static str {
        "Shimmer"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let sample = self
                    .noise
                    .sample(x as f32 * t * 0.1, y as f32 * t * 0.1);
                // The field is centered on zero; clipping leaves dark
                // patches between the bright blobs.
                frame.set(x, y, self.params.light(clip_intensity(sample)));
            }
        }
        frame
    }
}

/// Starry sky: every cell twinkles on its own sinusoid whose rate comes
/// from a Gaussian coefficient drawn once per cell at construction.
#[derive(Debug)]
pub struct Stars {
    grid: GridSpec,
    params: ModeParams,
    coefficients: Vec<f32>,
}

impl Stars {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, mut rng: StdRng) -> Self {
        let coefficients = (0..grid.cell_count())
            .map(|_| gaussian(&mut rng, 0.5, 0.2))
            .collect();
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
            coefficients,
        }
    }
}

impl Generator for Stars {
    fn name(&self) -> &'static str {
        "Starry sky"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let coefficient = self.coefficients[self.grid.cell_index(x, y)].max(0.01);
                let intensity = normalized_sin(coefficient * 7.0 * t);
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
    fn shimmer_intensities_stay_valid() {
        let mut shimmer = Shimmer::with_seed(grid(), 99);
        for it in 0..120 {
            let frame = shimmer.generate(it as f32 / 60.0, it);
            assert_eq!(frame.len(), 196);
            for cell in frame.cells() {
                assert!((0.0..=1.0).contains(&cell.intensity));
            }
        }
    }

    #[test]
    fn stars_twinkle_independently() {
        let mut stars = Stars::seeded(grid(), 8);
        let frame = stars.generate(1.3, 78);
        let first = frame.get(0, 0).intensity;
        let differs = frame.cells().iter().any(|cell| cell.intensity != first);
        assert!(differs, "all cells twinkled in lockstep");
    }

    #[test]
    fn star_coefficients_are_fixed_per_instance() {
        let mut stars = Stars::seeded(grid(), 8);
        let before = stars.coefficients.clone();
        stars.generate(0.5, 30);
        assert_eq!(stars.coefficients, before);
    }
}
