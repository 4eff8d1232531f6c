//! Shared math toolkit for the generators.
//!
//! Everything here is a free function over plain floats so that each
//! generator can stay a standalone type without inheriting shared state.

pub mod noise;

/// Clamps a derived value into the valid intensity range `[0, 1]`.
/// NaN collapses to 0 so a degenerate formula can never poison a frame.
pub fn clip_intensity(x: f32) -> f32 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Piecewise-linear interpolation over monotonically increasing
/// breakpoints. Inputs outside the breakpoint range clamp to the first or
/// last output; between consecutive breakpoints the outputs are blended
/// linearly. This is the universal "distance to intensity" shaping
/// function used across the generator family.
pub fn interp(x: f32, breakpoints: &[f32], outputs: &[f32]) -> f32 {
    debug_assert_eq!(breakpoints.len(), outputs.len());
    let Some((&first, &last)) = breakpoints.first().zip(breakpoints.last()) else {
        return 0.0;
    };
    if x <= first {
        return outputs[0];
    }
    if x >= last {
        return outputs[outputs.len() - 1];
    }

    for i in 0..breakpoints.len() - 1 {
        let (x0, x1) = (breakpoints[i], breakpoints[i + 1]);
        if x <= x1 {
            if (x1 - x0).abs() <= f32::EPSILON {
                return outputs[i + 1];
            }
            let fraction = (x - x0) / (x1 - x0);
            return outputs[i] + fraction * (outputs[i + 1] - outputs[i]);
        }
    }

    outputs[outputs.len() - 1]
}

/// Euclidean length of a 2-D vector.
pub fn length(x: f32, y: f32) -> f32 {
    x.hypot(y)
}

/// Cartesian to polar: returns `(radius, angle)` with the angle in
/// `(-pi, pi]` as produced by `atan2`.
pub fn cart_to_polar(x: f32, y: f32) -> (f32, f32) {
    (length(x, y), y.atan2(x))
}

/// Polar to cartesian.
pub fn polar_to_cart(rho: f32, phi: f32) -> (f32, f32) {
    (rho * phi.cos(), rho * phi.sin())
}

/// Rotates a point around the origin by `angle` radians.
pub fn rotate_point(x: f32, y: f32, angle: f32) -> (f32, f32) {
    let (s, c) = angle.sin_cos();
    (x * c - y * s, x * s + y * c)
}

/// Sinusoid remapped from `[-1, 1]` to `[0, 1]`.
pub fn normalized_sin(t: f32) -> f32 {
    0.5 * (t.sin() + 1.0)
}

/// Mirror reflection of `v` about a wall with unit normal `n`.
pub fn reflect(v: (f32, f32), n: (f32, f32)) -> (f32, f32) {
    let d = v.0 * n.0 + v.1 * n.1;
    (v.0 - 2.0 * d * n.0, v.1 - 2.0 * d * n.1)
}

/// Normalizes a direction vector. A zero-length input falls back to a
/// safe horizontal direction instead of dividing by zero.
pub fn normalize_vec(x: f32, y: f32) -> (f32, f32) {
    let len = length(x, y);
    if len <= f32::EPSILON {
        return (1.0, 0.0);
    }
    (x / len, y / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_is_idempotent_and_bounded() {
        for x in [-10.0, -0.1, 0.0, 0.3, 1.0, 7.5, f32::INFINITY] {
            let once = clip_intensity(x);
            assert!((0.0..=1.0).contains(&once));
            assert_eq!(clip_intensity(once), once);
        }
        assert_eq!(clip_intensity(f32::NAN), 0.0);
    }

    #[test]
    fn interp_clamps_outside_breakpoints() {
        let xs = [0.0, 0.5, 1.0];
        let ys = [1.0, 1.0, 0.0];
        assert_eq!(interp(-1.0, &xs, &ys), 1.0);
        assert_eq!(interp(2.0, &xs, &ys), 0.0);
    }

    #[test]
    fn interp_blends_between_breakpoints() {
        let xs = [0.0, 1.0];
        let ys = [0.0, 2.0];
        assert!((interp(0.25, &xs, &ys) - 0.5).abs() < 1e-6);
        assert!((interp(0.75, &xs, &ys) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn interp_survives_duplicate_breakpoints() {
        let xs = [0.0, 0.0, 1.0];
        let ys = [0.0, 1.0, 1.0];
        let value = interp(0.0, &xs, &ys);
        assert!((0.0..=1.0).contains(&value));
    }

    #[test]
    fn reflect_flips_only_the_normal_component() {
        let (vx, vy) = reflect((0.6, 0.8), (-1.0, 0.0));
        assert!((vx + 0.6).abs() < 1e-6);
        assert!((vy - 0.8).abs() < 1e-6);
    }

    #[test]
    fn normalize_vec_guards_zero_length() {
        assert_eq!(normalize_vec(0.0, 0.0), (1.0, 0.0));
        let (x, y) = normalize_vec(3.0, 4.0);
        assert!((length(x, y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn polar_round_trip() {
        let (rho, phi) = cart_to_polar(0.3, -0.4);
        let (x, y) = polar_to_cart(rho, phi);
        assert!((x - 0.3).abs() < 1e-6);
        assert!((y + 0.4).abs() < 1e-6);
    }
}
