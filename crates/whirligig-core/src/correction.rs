//! Self-correction policy applied once user interaction settles

/// Whether the track may react to a settled interaction at all
#[inline]
pub fn can_self_correct(
    prevent_auto_correct: bool,
    is_animating: bool,
    is_scrolling: bool,
    has_other_interaction: bool,
) -> bool {
    !prevent_auto_correct && !is_animating && !is_scrolling && !has_other_interaction
}

/// Whether the reaction should move the track back onto a slide boundary
#[inline]
pub fn should_snap(can_self_correct: bool, snap_to_slide: bool) -> bool {
    can_self_correct && snap_to_slide
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_track_corrects() {
        assert!(can_self_correct(false, false, false, false));
        assert!(!can_self_correct(true, false, false, false));
        assert!(!can_self_correct(false, true, false, false));
        assert!(!can_self_correct(false, false, true, false));
        assert!(!can_self_correct(false, false, false, true));
    }

    #[test]
    fn test_snap_requires_both() {
        assert!(should_snap(true, true));
        assert!(!should_snap(true, false));
        assert!(!should_snap(false, true));
    }
}
