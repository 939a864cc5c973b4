//! Comet trail styling
//!
//! Opacity falls off along a Gaussian toward the tail and width tapers
//! linearly, so a short window of the path reads as a moving streak.

use crate::consts::{ALPHA_CLAMP, GAUSSIAN_SHARPNESS};
use crate::linspace;

/// Per-point opacity across a window of `count` points, tail first.
///
/// Peaks at 1.0 on the newest point; anything below `ALPHA_CLAMP` is zeroed.
pub fn gaussian_alphas(count: usize) -> Vec<f32> {
    linspace(0.0, 1.0, count)
        .into_iter()
        .map(|d| {
            let alpha = (-GAUSSIAN_SHARPNESS * (d - 1.0) * (d - 1.0)).exp();
            if alpha < ALPHA_CLAMP { 0.0 } else { alpha }
        })
        .collect()
}

/// Per-point width from `min_width` at the tail to `max_width` at the head
pub fn width_taper(count: usize, min_width: f32, max_width: f32) -> Vec<f32> {
    linspace(min_width, max_width, count)
}

/// Whole-trail opacity multiplier for long runs.
///
/// 1.0 up to `start`, then linear down to 0.0 over `span` frames.
pub fn global_fade(frame: usize, start: usize, span: usize) -> f32 {
    if frame <= start || span == 0 {
        return 1.0;
    }
    let progress = (frame - start) as f32 / span as f32;
    1.0 - progress.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GLOBAL_FADE_SPAN, GLOBAL_FADE_START, MAX_WIDTH, MIN_WIDTH};

    #[test]
    fn test_alpha_peaks_at_head() {
        let alphas = gaussian_alphas(30);
        assert_eq!(alphas.len(), 30);
        assert_eq!(*alphas.last().unwrap(), 1.0);
        // exp(-10) is far below the clamp
        assert_eq!(alphas[0], 0.0);
    }

    #[test]
    fn test_alpha_non_decreasing() {
        for count in 2..40 {
            let alphas = gaussian_alphas(count);
            for pair in alphas.windows(2) {
                assert!(pair[0] <= pair[1], "count {count}: {alphas:?}");
            }
        }
    }

    #[test]
    fn test_width_strictly_increasing() {
        let widths = width_taper(30, MIN_WIDTH, MAX_WIDTH);
        assert_eq!(widths[0], MIN_WIDTH);
        assert_eq!(widths[29], MAX_WIDTH);
        for pair in widths.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_global_fade_curve() {
        assert_eq!(global_fade(0, GLOBAL_FADE_START, GLOBAL_FADE_SPAN), 1.0);
        assert_eq!(global_fade(120, GLOBAL_FADE_START, GLOBAL_FADE_SPAN), 1.0);
        assert!((global_fade(170, GLOBAL_FADE_START, GLOBAL_FADE_SPAN) - 0.5).abs() < 1e-6);
        assert_eq!(global_fade(220, GLOBAL_FADE_START, GLOBAL_FADE_SPAN), 0.0);
        assert_eq!(global_fade(400, GLOBAL_FADE_START, GLOBAL_FADE_SPAN), 0.0);
    }
}
