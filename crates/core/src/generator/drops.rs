//! Particle modes: expanding rings spawned over time.
//!
//! Retired particles are always removed by filtering the whole list
//! between frames; nothing is ever deleted by index while the list is
//! being iterated, so expiring several particles in one tick cannot
//! corrupt the survivors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::{FrameBuffer, GridSpec, LightValue, Rgb};
use crate::generator::{Generator, ModeParams};
use crate::math::{clip_intensity, interp, length};

const THICKNESS: f32 = 0.2;
const MAX_RADIUS: f32 = 2.0;
const RING_SPEED: f32 = 3.0;

const PULSE_PALETTE: [Rgb; 3] = [Rgb::RED, Rgb::BLUE, Rgb::GREEN];
const PULSE_INTERVAL: u64 = 5;

/// One live particle: a ring expanding outward from its spawn position.
#[derive(Debug, Clone, Copy)]
struct Ripple {
    position: (f32, f32),
    spawn_time: f32,
    speed: f32,
    color: Rgb,
}

impl Ripple {
    fn radius(&self, t: f32) -> f32 {
        ((t - self.spawn_time) * self.speed).max(0.0)
    }

    fn expired(&self, t: f32) -> bool {
        self.radius(t) > MAX_RADIUS
    }

    fn contribution(&self, t: f32, x_n: f32, y_n: f32) -> f32 {
        let distance = length(x_n - self.position.0, y_n - self.position.1);
        let radius = self.radius(t);
        interp(
            distance,
            &[radius - THICKNESS / 2.0, radius, radius + THICKNESS / 2.0],
            &[0.0, 1.0, 0.0],
        )
    }
}

/// Rain: rings spawn at random positions with randomized inter-arrival
/// times, all painted in the configured color.
#[derive(Debug)]
pub struct Rain {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    ripples: Vec<Ripple>,
    next_spawn: u64,
}

impl Rain {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0),
            rng,
            ripples: Vec::new(),
            next_spawn: 0,
        }
    }
}

impl Generator for Rain {
    fn name(&self) -> &'static str {
        "Rain"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, it: u64) -> FrameBuffer {
        self.ripples.retain(|ripple| !ripple.expired(t));

        if it >= self.next_spawn {
            let position = (self.rng.gen::<f32>() - 0.5, self.rng.gen::<f32>() - 0.5);
            self.ripples.push(Ripple {
                position,
                spawn_time: t,
                speed: RING_SPEED,
                color: self.params.color,
            });
            self.next_spawn = it + self.rng.gen_range(20..40);
        }

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let total: f32 = self
                    .ripples
                    .iter()
                    .map(|ripple| ripple.contribution(t, x_n, y_n))
                    .sum();
                frame.set(x, y, self.params.light(clip_intensity(total)));
            }
        }
        frame
    }
}

/// Colorful pulse: rings spawn from the panel center on a fixed cadence,
/// each wearing a randomly picked palette color.
#[derive(Debug)]
pub struct ColorPulse {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    ripples: Vec<Ripple>,
    next_spawn: u64,
}

impl ColorPulse {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0),
            rng,
            ripples: Vec::new(),
            next_spawn: 0,
        }
    }
}

impl Generator for ColorPulse {
    fn name(&self) -> &'static str {
        "Colorful pulse"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, it: u64) -> FrameBuffer {
        self.ripples.retain(|ripple| !ripple.expired(t));

        if it >= self.next_spawn {
            let color = PULSE_PALETTE[self.rng.gen_range(0..PULSE_PALETTE.len())];
            self.ripples.push(Ripple {
                position: (0.0, 0.0),
                spawn_time: t,
                speed: RING_SPEED,
                color,
            });
            self.next_spawn = it + PULSE_INTERVAL;
        }

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let mut total = 0.0;
                let mut strongest: Option<(f32, Rgb)> = None;
                for ripple in &self.ripples {
                    let contribution = ripple.contribution(t, x_n, y_n);
                    total += contribution;
                    if strongest.map_or(true, |(best, _)| contribution > best) {
                        strongest = Some((contribution, ripple.color));
                    }
                }
                let color = strongest.map_or(self.params.color, |(_, color)| color);
                frame.set(x, y, LightValue::new(color, clip_intensity(total)));
            }
        }
        frame
    }
}
