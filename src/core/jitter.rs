use rand::Rng;

/// Lower bound of the display offset.
pub const JITTER_MIN: i32 = -10;
/// Upper bound of the display offset.
pub const JITTER_MAX: i32 = 15;

/// Apply a randomized display offset to a match score.
///
/// Display-only embellishment: adds a uniform integer offset in
/// [JITTER_MIN, JITTER_MAX] and clamps to the 0-100 score range. The
/// canonical scorer stays deterministic; jittered scores must never feed
/// the allocator.
pub fn jittered_score<R: Rng + ?Sized>(base: f64, rng: &mut R) -> f64 {
    let offset = rng.gen_range(JITTER_MIN..=JITTER_MAX) as f64;
    (base + offset).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_jittered_score_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for base in [0.0, 3.0, 50.0, 97.0, 100.0] {
            for _ in 0..200 {
                let score = jittered_score(base, &mut rng);
                assert!(score >= 0.0 && score <= 100.0);
            }
        }
    }

    #[test]
    fn test_offset_within_configured_window() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let score = jittered_score(50.0, &mut rng);
            assert!(score >= 50.0 + JITTER_MIN as f64);
            assert!(score <= 50.0 + JITTER_MAX as f64);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);

        for _ in 0..50 {
            assert_eq!(jittered_score(60.0, &mut a), jittered_score(60.0, &mut b));
        }
    }
}
