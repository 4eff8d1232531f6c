//! Small procedural-noise helpers for the shimmer and starfield modes.

use rand::Rng;

const FIRST_OCTAVE_WEIGHT: f32 = 0.6;
const OCTAVES: u32 = 3;

/// Coherent value noise over a 2-D lattice.
///
/// Lattice corners get a deterministic pseudo-random value from an
/// integer hash; samples in between are blended with a smoothstep fade.
/// Three octaves are summed so the field has both broad swells and fine
/// grain. Output is centered on zero in roughly `[-0.5, 0.5]`, matching
/// the convention of gradient-noise libraries, so callers that clip to
/// `[0, 1]` get patches of darkness between the bright blobs.
#[derive(Debug, Clone, Copy)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = FIRST_OCTAVE_WEIGHT;
        for octave in 0..OCTAVES {
            total += self.octave(x * frequency, y * frequency, octave) * amplitude;
            frequency *= 2.0;
            amplitude *= 0.5;
        }
        total - 0.5
    }

    fn octave(&self, x: f32, y: f32, octave: u32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;
        let fx = fade(x - xi as f32);
        let fy = fade(y - yi as f32);

        let top = lerp(
            self.lattice(xi, yi, octave),
            self.lattice(xi + 1, yi, octave),
            fx,
        );
        let bottom = lerp(
            self.lattice(xi, yi + 1, octave),
            self.lattice(xi + 1, yi + 1, octave),
            fx,
        );
        lerp(top, bottom, fy)
    }

    /// Integer hash of a lattice corner, mapped into `[0, 1)`.
    fn lattice(&self, x: i32, y: i32, octave: u32) -> f32 {
        let mut state = self
            .seed
            .wrapping_add(octave.wrapping_mul(0x9E37_79B9))
            .wrapping_add((x as u32).wrapping_mul(0x85EB_CA6B))
            .wrapping_add((y as u32).wrapping_mul(0xC2B2_AE35));
        state ^= state >> 15;
        state = state.wrapping_mul(0x2C1B_3C6D);
        state ^= state >> 12;
        state = state.wrapping_mul(0x297A_2D39);
        state ^= state >> 15;
        state as f32 / u32::MAX as f32
    }
}

fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One draw from a normal distribution via the Box-Muller transform.
pub fn gaussian<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1: f32 = rng.gen_range(1e-6..1.0_f32);
    let u2: f32 = rng.gen();
    let mag = (-2.0 * u1.ln()).sqrt();
    mean + std_dev * mag * (std::f32::consts::TAU * u2).cos()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn sampling_is_deterministic_per_seed() {
        let a = ValueNoise::new(7);
        let b = ValueNoise::new(7);
        let c = ValueNoise::new(8);

        assert_eq!(a.sample(1.3, 4.2), b.sample(1.3, 4.2));
        assert_ne!(a.sample(1.3, 4.2), c.sample(1.3, 4.2));
    }

    #[test]
    fn samples_stay_in_a_sane_band() {
        let noise = ValueNoise::new(42);
        for i in 0..200 {
            let v = noise.sample(i as f32 * 0.37, i as f32 * 0.11);
            assert!((-1.0..=1.0).contains(&v), "sample {v} out of band");
        }
    }

    #[test]
    fn gaussian_centers_on_the_mean() {
        let mut rng = StdRng::seed_from_u64(1);
        let sum: f32 = (0..2000).map(|_| gaussian(&mut rng, 0.5, 0.2)).sum();
        let mean = sum / 2000.0;
        assert!((mean - 0.5).abs() < 0.05, "mean drifted to {mean}");
    }
}
