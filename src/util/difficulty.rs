use std::f64::consts::PI;

/// Fraction of a pool recovered over `ms` milliseconds when `rate` is the
/// fraction recoverable per second.
pub fn recovery(rate: f64, ms: f64) -> f64 {
    1.0 - f64::powf(1.0 - rate, ms / 1000.0)
}

/// Fraction of a pool that remains after recovering for `ms` milliseconds.
pub fn retention(rate: f64, ms: f64) -> f64 {
    1.0 - recovery(rate, ms)
}

pub const fn reverse_lerp(x: f64, start: f64, end: f64) -> f64 {
    f64::clamp((x - start) / (end - start), 0.0, 1.0)
}

/// Raised-cosine falloff from 1 at `start` to 0 at `end`.
///
/// Values outside of the band are clamped onto its edges.
pub fn cosine_falloff(x: f64, start: f64, end: f64) -> f64 {
    (f64::cos(PI * reverse_lerp(x, start, end)) + 1.0) / 2.0
}

/// Smooth step from 0 to 1 centered around `threshold`.
pub fn tanh_step(x: f64, threshold: f64, harshness: f64) -> f64 {
    f64::tanh((x - threshold) * harshness) / 2.0 + 0.5
}

/// Ratio of the larger to the smaller value, i.e. a value in `[1, ∞]`.
///
/// Two zeros are considered equal; a single zero yields infinity.
pub fn spread_ratio(a: f64, b: f64) -> f64 {
    let (min, max) = if a < b { (a, b) } else { (b, a) };

    if max <= 0.0 {
        1.0
    } else if min <= 0.0 {
        f64::INFINITY
    } else {
        max / min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovery_compounds_per_second() {
        assert!((recovery(0.5, 1000.0) - 0.5).abs() < 1e-12);
        assert!((recovery(0.5, 2000.0) - 0.75).abs() < 1e-12);
        assert!((retention(0.5, 2000.0) - 0.25).abs() < 1e-12);
        assert!(recovery(0.9, 0.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_falloff_edges() {
        assert!((cosine_falloff(0.0, 6.0, 16.0) - 1.0).abs() < 1e-12);
        assert!((cosine_falloff(6.0, 6.0, 16.0) - 1.0).abs() < 1e-12);
        assert!((cosine_falloff(11.0, 6.0, 16.0) - 0.5).abs() < 1e-12);
        assert!(cosine_falloff(16.0, 6.0, 16.0).abs() < 1e-12);
        assert!(cosine_falloff(100.0, 6.0, 16.0).abs() < 1e-12);
    }

    #[test]
    fn spread_ratio_limits() {
        assert!((spread_ratio(0.0, 0.0) - 1.0).abs() < 1e-12);
        assert!(spread_ratio(0.0, 5.0).is_infinite());
        assert!((spread_ratio(4.0, 2.0) - 2.0).abs() < 1e-12);
    }
}
