//! The animation generator family.
//!
//! Every mode is an independent type implementing [`Generator`]: it owns
//! its whole mutable state (particles, phases, leading points) and shares
//! nothing with other instances. The shared command surface lives in
//! [`ModeParams`], which each variant embeds.

pub mod band;
pub mod blink;
pub mod bounce;
pub mod drops;
pub mod figures;
pub mod noise_field;
pub mod ring;
pub mod spiral;
pub mod sweep;

use rand::Rng;

use crate::frame::{FrameBuffer, LightValue, Rgb};
use crate::math::clip_intensity;

/// Samples a uniformly random color, one channel at a time.
pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(rng.gen(), rng.gen(), rng.gen())
}

/// Parameter block shared by every mode: the externally settable color,
/// speed, brightness and random-color flag, plus the per-mode speed range
/// the raw `[0, 1]` speed is mapped onto.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeParams {
    pub color: Rgb,
    pub color_intensity: f32,
    /// Raw speed as received from the command surface, clipped to `[0, 1]`.
    pub speed: f32,
    pub brightness: f32,
    pub random_mode: bool,
    min_speed: f32,
    max_speed: f32,
}

impl ModeParams {
    pub fn new(min_speed: f32, max_speed: f32) -> Self {
        Self {
            color: Rgb::BLUE,
            color_intensity: 1.0,
            speed: 1.0,
            brightness: 1.0,
            random_mode: false,
            min_speed,
            max_speed,
        }
    }

    /// Overrides the default color, used by modes with a signature hue.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Affine-maps the raw speed onto this mode's `[min, max]` range.
    pub fn scaled_speed(&self) -> f32 {
        self.min_speed + self.speed * (self.max_speed - self.min_speed)
    }

    /// Picks a fresh random color if random mode is enabled. Generators
    /// call this at their recolor events (sinusoid troughs, wrap points,
    /// ring minima).
    pub fn maybe_randomize_color<R: Rng>(&mut self, rng: &mut R) {
        if self.random_mode {
            self.color = random_color(rng);
        }
    }

    /// A cell painted with the configured color at the given intensity.
    pub fn light(&self, intensity: f32) -> LightValue {
        LightValue::new(self.color, clip_intensity(intensity) * self.color_intensity)
    }
}

/// One animation mode.
///
/// `generate` is called once per controller tick with monotonically
/// non-decreasing `t` and `it`. It must be total and always return a
/// buffer of the configured dimensions; advancing its own internal state
/// is the only permitted side effect.
pub trait Generator: Send {
    fn name(&self) -> &'static str;
    fn params(&self) -> &ModeParams;
    fn params_mut(&mut self) -> &mut ModeParams;
    fn generate(&mut self, t: f32, it: u64) -> FrameBuffer;

    fn set_color(&mut self, color: Rgb) {
        self.params_mut().color = color;
    }

    fn set_color_with_intensity(&mut self, color: Rgb, intensity: f32) {
        let params = self.params_mut();
        params.color = color;
        params.color_intensity = clip_intensity(intensity);
    }

    fn set_speed(&mut self, raw: f32) {
        self.params_mut().speed = clip_intensity(raw);
    }

    fn set_brightness(&mut self, brightness: f32) {
        // Brightness is open-ended upward; only negatives and NaN are
        // rejected so downstream intensities stay well defined.
        let brightness = if brightness.is_nan() { 0.0 } else { brightness };
        self.params_mut().brightness = brightness.max(0.0);
    }

    fn set_random_mode(&mut self, enabled: bool) {
        self.params_mut().random_mode = enabled;
    }

    fn brightness(&self) -> f32 {
        self.params().brightness
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    struct Probe {
        params: ModeParams,
    }

    impl Generator for Probe {
        fn name(&self) -> &'static str {
            "probe"
        }

        fn params(&self) -> &ModeParams {
            &self.params
        }

        fn params_mut(&mut self) -> &mut ModeParams {
            &mut self.params
        }

        fn generate(&mut self, _t: f32, _it: u64) -> FrameBuffer {
            FrameBuffer::blank(2, 2)
        }
    }

    fn probe() -> Probe {
        Probe {
            params: ModeParams::new(1.0, 15.0),
        }
    }

    #[test]
    fn raw_speed_is_clipped_then_mapped() {
        let mut generator = probe();
        generator.set_speed(4.0);
        assert_eq!(generator.params().speed, 1.0);
        assert_eq!(generator.params().scaled_speed(), 15.0);

        generator.set_speed(-1.0);
        assert_eq!(generator.params().scaled_speed(), 1.0);

        generator.set_speed(0.5);
        assert_eq!(generator.params().scaled_speed(), 8.0);
    }

    #[test]
    fn brightness_never_goes_negative_or_nan() {
        let mut generator = probe();
        generator.set_brightness(-3.0);
        assert_eq!(generator.brightness(), 0.0);
        generator.set_brightness(f32::NAN);
        assert_eq!(generator.brightness(), 0.0);
        generator.set_brightness(1.5);
        assert_eq!(generator.brightness(), 1.5);
    }

    #[test]
    fn randomize_is_gated_by_the_flag() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut params = ModeParams::new(0.0, 1.0);

        params.maybe_randomize_color(&mut rng);
        assert_eq!(params.color, Rgb::BLUE);

        params.random_mode = true;
        params.maybe_randomize_color(&mut rng);
        // One in sixteen million chance of a false failure here.
        assert_ne!(params.color, Rgb::BLUE);
    }

    #[test]
    fn color_with_intensity_updates_both_fields() {
        let mut generator = probe();
        generator.set_color_with_intensity(Rgb::RED, 0.25);
        assert_eq!(generator.params().color, Rgb::RED);
        assert_eq!(generator.params().color_intensity, 0.25);
        assert_eq!(generator.params().light(1.0).intensity, 0.25);
    }
}
