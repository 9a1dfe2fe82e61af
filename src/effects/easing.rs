//! Easing curves. Input and output are clamped to `[0, 1]`.

/// Straight line.
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-out: fast start, gentle landing.
pub fn power2_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(2)
}

/// Cubic ease-out.
pub fn power3_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Progress of `elapsed` through a segment starting at `start` and lasting
/// `length` seconds. Zero-length segments jump straight to 1 once reached.
pub fn segment(elapsed: f32, start: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return if elapsed >= start { 1.0 } else { 0.0 };
    }
    ((elapsed - start) / length).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for ease in [linear, power2_out, power3_out] {
            assert_eq!(ease(0.0), 0.0);
            assert_eq!(ease(1.0), 1.0);
            assert_eq!(ease(-3.0), 0.0);
            assert_eq!(ease(7.0), 1.0);
        }
    }

    #[test]
    fn test_ease_out_leads_linear() {
        assert!(power2_out(0.5) > linear(0.5));
        assert!(power3_out(0.5) > power2_out(0.5));
        assert_eq!(power2_out(0.5), 0.75);
    }

    #[test]
    fn test_segment() {
        assert_eq!(segment(0.2, 0.5, 0.6), 0.0);
        assert!((segment(0.8, 0.5, 0.6) - 0.5).abs() < 1e-5);
        assert_eq!(segment(2.0, 0.5, 0.6), 1.0);
        assert_eq!(segment(0.5, 0.5, 0.0), 1.0);
    }
}
