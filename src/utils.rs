//! Numeric helpers shared across the pipeline.

pub mod safe_cast;

/// Map a unit sample in `[0, 1]` onto `[min, max]`
pub fn lerp(min: f64, max: f64, unit: f64) -> f64 {
    min + (max - min) * unit.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.1, 0.2, 0.0), 0.1);
        assert!((lerp(0.1, 0.2, 0.5) - 0.15).abs() < 1e-12);
        assert_eq!(lerp(0.1, 0.2, 7.0), 0.2);
    }
}
