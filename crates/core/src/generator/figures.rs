//! Closed-form geometric figures: cells light up inside an implicit
//! curve or an angular sector that moves with time.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::frame::{FrameBuffer, GridSpec, LightValue, Rgb};
use crate::generator::{Generator, ModeParams};
use crate::math::{cart_to_polar, interp, rotate_point};

use std::f32::consts::{PI, TAU};

/// Pulsing heart from the classic implicit sextic heart curve.
#[derive(Debug)]
pub struct Heart {
    grid: GridSpec,
    params: ModeParams,
}

impl Heart {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::RED),
        }
    }
}

impl Generator for Heart {
    fn name(&self) -> &'static str {
        "ILuvYu"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let pulse = 0.05 * ((t * 10.0).sin() + 1.0);
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_raw) = self.grid.normalize(x, y);
                // Flip the y axis so the heart points down, then nudge it
                // toward the panel center.
                let y_n = -y_raw + 0.1;
                let shell = (x_n * x_n + y_n * y_n - pulse).powi(3);
                let inside = shell < x_n * x_n * y_n.powi(3);
                frame.set(x, y, self.params.light(if inside { 1.0 } else { 0.0 }));
            }
        }
        frame
    }
}

/// A bright beam rotating around the panel with softly feathered edges.
#[derive(Debug)]
pub struct Lighthouse {
    grid: GridSpec,
    params: ModeParams,
}

impl Lighthouse {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
        }
    }
}

impl Generator for Lighthouse {
    fn name(&self) -> &'static str {
        "Lighthouse"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let beam_phase = (t * 2.0) % 1.0;
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let (_, phi) = cart_to_polar(x_n, y_n);
                let phi_n = (phi + PI) / TAU;
                let diff = (phi_n - beam_phase).abs();
                let intensity = interp(
                    diff,
                    &[0.31, 0.36, 0.63, 0.68],
                    &[0.0, 1.0, 1.0, 0.0],
                );
                frame.set(x, y, self.params.light(intensity));
            }
        }
        frame
    }
}

/// Spinning two-tone disk: the angular half facing the rotating phase is
/// red, the opposite half green.
#[derive(Debug)]
pub struct Disk {
    grid: GridSpec,
    params: ModeParams,
}

impl Disk {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0),
        }
    }
}

impl Generator for Disk {
    fn name(&self) -> &'static str {
        "Spinning"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let spin_phase = (t * 4.0) % 1.0;
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let (_, phi) = cart_to_polar(x_n, y_n);
                let phi_n = (phi + PI) / TAU;
                let diff = (phi_n - spin_phase).abs();
                let color = if diff < 0.75 && diff > 0.25 {
                    Rgb::RED
                } else {
                    Rgb::GREEN
                };
                frame.set(x, y, LightValue::new(color, 1.0));
            }
        }
        frame
    }
}

/// Red/green angular split swinging back and forth like a metronome arm.
#[derive(Debug)]
pub struct Metronome {
    grid: GridSpec,
    params: ModeParams,
}

impl Metronome {
    pub fn new(grid: GridSpec) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0),
        }
    }
}

impl Generator for Metronome {
    fn name(&self) -> &'static str {
        "Metronome"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let threshold = (t * 10.0).sin() * PI;
        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let (_, phi) = cart_to_polar(x_n, y_n);
                let color = if phi < threshold { Rgb::RED } else { Rgb::GREEN };
                frame.set(x, y, LightValue::new(color, 1.0));
            }
        }
        frame
    }
}

const LINE_CYCLE: f32 = 1.5;
const LINE_EDGE: f32 = 0.15;

/// A soft line at a random angle sweeping across the panel; each time the
/// sweep wraps, a new angle is drawn.
#[derive(Debug)]
pub struct AngledLines {
    grid: GridSpec,
    params: ModeParams,
    rng: StdRng,
    angle: f32,
    last_offset: f32,
}

impl AngledLines {
    pub fn new(grid: GridSpec) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSpec, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpec, rng: StdRng) -> Self {
        Self {
            grid,
            params: ModeParams::new(5.0, 15.0).with_color(Rgb::YELLOW),
            rng,
            angle: 0.0,
            last_offset: 0.0,
        }
    }
}

impl Generator for AngledLines {
    fn name(&self) -> &'static str {
        "Angled Lines"
    }

    fn params(&self) -> &ModeParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ModeParams {
        &mut self.params
    }

    fn generate(&mut self, t: f32, _it: u64) -> FrameBuffer {
        let offset = (t * 3.0) % LINE_CYCLE - LINE_CYCLE / 2.0;
        if self.last_offset - offset > 0.5 {
            self.angle = self.rng.gen::<f32>() * TAU;
        }
        self.last_offset = offset;

        let mut frame = self.grid.blank_frame();
        for x in 0..self.grid.width {
            for y in 0..self.grid.height {
                let (x_n, y_n) = self.grid.normalize(x, y);
                let (_, y_rotated) = rotate_point(x_n, y_n, self.angle);
                let intensity = interp(
                    y_rotated,
                    &[offset - LINE_EDGE, offset, offset + LINE_EDGE],
                    &[0.0, 1.0, 0.0],
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
    fn heart_center_is_inside_the_curve() {
        let mut heart = Heart::new(grid());
        let frame = heart.generate(0.0, 0);
        // Slightly below center in logical coordinates after the y flip.
        assert_eq!(frame.get(7, 6).intensity, 1.0);
        assert_eq!(frame.get(0, 13).intensity, 0.0);
        assert_eq!(frame.get(7, 6).color, Rgb::RED);
    }

    #[test]
    fn lighthouse_beam_is_partial_and_bounded() {
        let mut lighthouse = Lighthouse::new(grid());
        let frame = lighthouse.generate(0.2, 12);
        let lit = frame
            .cells()
            .iter()
            .filter(|cell| cell.intensity > 0.0)
            .count();
        assert!(lit > 0 && lit < frame.len(), "beam covered {lit} cells");
        for cell in frame.cells() {
            assert!((0.0..=1.0).contains(&cell.intensity));
        }
    }

    #[test]
    fn disk_only_shows_its_two_tones() {
        let mut disk = Disk::new(grid());
        let frame = disk.generate(0.4, 24);
        let reds = frame
            .cells()
            .iter()
            .filter(|cell| cell.color == Rgb::RED)
            .count();
        let greens = frame
            .cells()
            .iter()
            .filter(|cell| cell.color == Rgb::GREEN)
            .count();
        assert_eq!(reds + greens, frame.len());
        assert!(reds > 0 && greens > 0);
    }

    #[test]
    fn metronome_splits_the_panel() {
        let mut metronome = Metronome::new(grid());
        let frame = metronome.generate(0.16, 10);
        let reds = frame
            .cells()
            .iter()
            .filter(|cell| cell.color == Rgb::RED)
            .count();
        assert!(reds > 0 && reds < frame.len());
    }

    #[test]
    fn angled_line_redraws_its_angle_on_wrap() {
        let mut lines = AngledLines::seeded(grid(), 17);
        let initial = lines.angle;
        // March time across several sweep cycles.
        let mut it = 0;
        let mut t = 0.0;
        while t < 3.0 {
            lines.generate(t, it);
            t += 1.0 / 60.0;
            it += 1;
        }
        assert_ne!(lines.angle, initial, "angle never re-randomized");
    }
}
