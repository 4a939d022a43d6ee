//! Index normalisation: wrap-around or clamp into `[0, len)`

/// Map `index` onto a valid slide index for a track of `len` slides.
///
/// With `wrap` the result is the mathematical modulo (negative input wraps
/// from the end); without it the index is clamped to `[0, len - 1]`.
/// `len` must be at least 1.
#[inline]
pub fn normalize(index: i64, len: usize, wrap: bool) -> usize {
    debug_assert!(len > 0, "normalize called with an empty track");
    if wrap {
        wrap_around(index, len)
    } else {
        clamp(index, len)
    }
}

#[inline]
fn wrap_around(index: i64, len: usize) -> usize {
    index.rem_euclid(len as i64) as usize
}

#[inline]
fn clamp(index: i64, len: usize) -> usize {
    index.clamp(0, len as i64 - 1) as usize
}
