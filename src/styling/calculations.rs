//! Pure calculation functions for declared image dimensions.
//!
//! All functions here are pure and testable without any encoder state.
//! Integer division truncates toward zero, matching what the CDN computes
//! for the same style codes.

/// Declared width and height of a media object.
///
/// Signed on purpose: a crop anchored past the right or bottom edge drives a
/// dimension to zero or below, which makes the media unrenderable rather than
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both axes are strictly positive.
    pub fn is_renderable(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// The larger of width and height.
    pub fn longest(self) -> i32 {
        self.width.max(self.height)
    }
}

/// `target * numerator / denominator`, computed in 64 bits and saturated into `i32`.
///
/// Returns 0 when the denominator is 0.
fn proportional(target: i32, numerator: i32, denominator: i32) -> i32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = i64::from(target) * i64::from(numerator) / i64::from(denominator);
    i32::try_from(scaled).unwrap_or(if scaled < 0 { i32::MIN } else { i32::MAX })
}

/// Crop to a rectangle anchored at `(x, y)`.
///
/// The result never extends past the current edges: each axis becomes the
/// smaller of the requested size and what remains after the offset.
pub fn crop(dims: Dimensions, x: i32, y: i32, width: i32, height: i32) -> Dimensions {
    Dimensions {
        width: width.min(dims.width.saturating_sub(x)),
        height: height.min(dims.height.saturating_sub(y)),
    }
}

/// Shrink to `target` width, keeping aspect ratio. Never enlarges.
///
/// # Examples
/// ```
/// # use product_page::styling::{Dimensions, scale_to_width};
/// assert_eq!(scale_to_width(Dimensions::new(400, 300), 200), Dimensions::new(200, 150));
/// assert_eq!(scale_to_width(Dimensions::new(100, 300), 200), Dimensions::new(100, 300));
/// ```
pub fn scale_to_width(dims: Dimensions, target: i32) -> Dimensions {
    if dims.width > target {
        Dimensions {
            width: target,
            height: proportional(target, dims.height, dims.width),
        }
    } else {
        dims
    }
}

/// Shrink to `target` height, keeping aspect ratio. Never enlarges.
pub fn scale_to_height(dims: Dimensions, target: i32) -> Dimensions {
    if dims.height > target {
        Dimensions {
            width: proportional(target, dims.width, dims.height),
            height: target,
        }
    } else {
        dims
    }
}

/// Shrink the longer axis to `side`, keeping aspect ratio. Never enlarges.
///
/// Width is treated as the longer axis only when strictly longer; squares
/// are scaled through the height branch.
pub fn scale_to_longest(dims: Dimensions, side: i32) -> Dimensions {
    if dims.width > dims.height {
        if side < dims.width {
            return Dimensions {
                width: side,
                height: proportional(side, dims.height, dims.width),
            };
        }
    } else if side < dims.height {
        return Dimensions {
            width: proportional(side, dims.width, dims.height),
            height: side,
        };
    }
    dims
}

/// Set width to `target` and rescale height, growing or shrinking.
pub fn upscale_to_width(dims: Dimensions, target: i32) -> Dimensions {
    Dimensions {
        width: target,
        height: proportional(target, dims.height, dims.width),
    }
}

/// Set height to `target` and rescale width, growing or shrinking.
pub fn upscale_to_height(dims: Dimensions, target: i32) -> Dimensions {
    Dimensions {
        width: proportional(target, dims.width, dims.height),
        height: target,
    }
}

/// Set the longer axis to `side` and rescale the other, growing or shrinking.
pub fn upscale_to_longest(dims: Dimensions, side: i32) -> Dimensions {
    if dims.width > dims.height {
        Dimensions {
            width: side,
            height: proportional(side, dims.height, dims.width),
        }
    } else {
        Dimensions {
            width: proportional(side, dims.width, dims.height),
            height: side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: i32, height: i32) -> Dimensions {
        Dimensions::new(width, height)
    }

    // =========================================================================
    // crop tests
    // =========================================================================

    #[test]
    fn crop_inside_bounds_uses_requested_size() {
        assert_eq!(crop(dims(500, 400), 10, 10, 100, 50), dims(100, 50));
    }

    #[test]
    fn crop_clamps_to_remaining_area() {
        // 500 - 450 = 50 left on x, 400 - 300 = 100 left on y
        assert_eq!(crop(dims(500, 400), 450, 300, 200, 200), dims(50, 100));
    }

    #[test]
    fn crop_past_edge_goes_non_positive() {
        let cropped = crop(dims(100, 100), 150, 0, 10, 10);
        assert_eq!(cropped.width, -50);
        assert!(!cropped.is_renderable());
    }

    // =========================================================================
    // shrink-only scaling tests
    // =========================================================================

    #[test]
    fn scale_to_width_shrinks_proportionally() {
        assert_eq!(scale_to_width(dims(1000, 750), 500), dims(500, 375));
    }

    #[test]
    fn scale_to_width_truncates() {
        // 100 * 333 / 1000 = 33.3
        assert_eq!(scale_to_width(dims(1000, 333), 100), dims(100, 33));
    }

    #[test]
    fn scale_to_width_never_enlarges() {
        assert_eq!(scale_to_width(dims(300, 200), 300), dims(300, 200));
        assert_eq!(scale_to_width(dims(300, 200), 301), dims(300, 200));
    }

    #[test]
    fn scale_to_height_shrinks_proportionally() {
        assert_eq!(scale_to_height(dims(750, 1000), 500), dims(375, 500));
    }

    #[test]
    fn scale_to_height_never_enlarges() {
        assert_eq!(scale_to_height(dims(300, 200), 250), dims(300, 200));
    }

    #[test]
    fn scale_to_longest_landscape() {
        assert_eq!(scale_to_longest(dims(2000, 1500), 1000), dims(1000, 750));
    }

    #[test]
    fn scale_to_longest_portrait() {
        assert_eq!(scale_to_longest(dims(1500, 2000), 1000), dims(750, 1000));
    }

    #[test]
    fn scale_to_longest_square_uses_height_branch() {
        assert_eq!(scale_to_longest(dims(200, 200), 120), dims(120, 120));
    }

    #[test]
    fn scale_to_longest_is_noop_when_already_smaller() {
        assert_eq!(scale_to_longest(dims(100, 200), 500), dims(100, 200));
        assert_eq!(scale_to_longest(dims(0, 0), 500), dims(0, 0));
    }

    #[test]
    fn scale_to_longest_never_increases_either_axis() {
        for (w, h) in [(1, 1), (640, 480), (480, 640), (7, 9000), (9000, 7)] {
            for side in [1, 5, 100, 640, 10_000] {
                let out = scale_to_longest(dims(w, h), side);
                assert!(out.width <= w && out.height <= h, "{w}x{h} @ {side} → {out:?}");
            }
        }
    }

    // =========================================================================
    // upscaling tests
    // =========================================================================

    #[test]
    fn upscale_to_width_grows() {
        assert_eq!(upscale_to_width(dims(100, 50), 400), dims(400, 200));
    }

    #[test]
    fn upscale_to_width_also_shrinks() {
        assert_eq!(upscale_to_width(dims(400, 200), 100), dims(100, 50));
    }

    #[test]
    fn upscale_to_width_zero_width_guard() {
        assert_eq!(upscale_to_width(dims(0, 50), 400), dims(400, 0));
    }

    #[test]
    fn upscale_to_height_zero_height_guard() {
        assert_eq!(upscale_to_height(dims(50, 0), 400), dims(0, 400));
    }

    #[test]
    fn upscale_to_longest_landscape_and_portrait() {
        assert_eq!(upscale_to_longest(dims(200, 100), 800), dims(800, 400));
        assert_eq!(upscale_to_longest(dims(100, 200), 800), dims(400, 800));
    }

    #[test]
    fn upscale_to_longest_never_negative() {
        for (w, h) in [(0, 0), (0, 10), (10, 0), (3, 7)] {
            let out = upscale_to_longest(dims(w, h), 1000);
            assert!(out.width >= 0 && out.height >= 0, "{w}x{h} → {out:?}");
        }
    }

    #[test]
    fn proportional_saturates_instead_of_overflowing() {
        assert_eq!(upscale_to_width(dims(1, i32::MAX), i32::MAX).height, i32::MAX);
    }
}
