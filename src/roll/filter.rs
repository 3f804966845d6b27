//! Frame filtering — decides which queried haps belong in the visible frame.

use crate::pattern::Hap;

use super::window::Window;

/// Whether a hap is visible at `now` under the given window.
///
/// Two-part rule:
/// - with `hide_negative` set, haps starting before cycle zero are dropped;
///   haps starting at non-negative time are never affected by the flag;
/// - the hap must overlap `[now + from, now + to)` at all, partial overlaps
///   included, so a note that started before the window but extends into it
///   stays visible.
pub fn is_visible(hap: &Hap, now: f64, window: &Window, hide_negative: bool) -> bool {
    (!hide_negative || hap.whole.begin >= 0.0)
        && hap.is_active_within(now + window.from, now + window.to)
}

/// Filter a candidate set down to the visible haps, preserving order.
pub fn visible_haps(haps: &[Hap], now: f64, window: &Window, hide_negative: bool) -> Vec<Hap> {
    haps.iter()
        .filter(|h| is_visible(h, now, window, hide_negative))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window {
        // Covers [-2, 2) around now.
        Window { from: -2.0, to: 2.0 }
    }

    #[test]
    fn negative_start_hidden_only_when_flag_set() {
        let hap = Hap::pitch(-1.0, 1.0, 60.0);
        assert!(!is_visible(&hap, 0.0, &window(), true));
        assert!(is_visible(&hap, 0.0, &window(), false));
    }

    #[test]
    fn flag_never_affects_non_negative_starts() {
        let hap = Hap::pitch(0.0, 1.0, 60.0);
        assert!(is_visible(&hap, 0.0, &window(), true));
        assert!(is_visible(&hap, 0.0, &window(), false));
    }

    #[test]
    fn partial_overlap_is_visible() {
        // Starts before the window, extends into it.
        let hap = Hap::pitch(1.0, 5.0, 60.0);
        assert!(is_visible(&hap, 4.0, &window(), false));
    }

    #[test]
    fn outside_window_is_hidden() {
        let hap = Hap::pitch(10.0, 11.0, 60.0);
        assert!(!is_visible(&hap, 0.0, &window(), false));
    }

    #[test]
    fn window_moves_with_now() {
        let hap = Hap::pitch(10.0, 11.0, 60.0);
        assert!(is_visible(&hap, 10.0, &window(), false));
        assert!(!is_visible(&hap, 20.0, &window(), false));
    }

    #[test]
    fn visible_haps_preserves_order() {
        let haps = vec![
            Hap::pitch(-1.0, 0.5, 48.0),
            Hap::pitch(0.0, 1.0, 60.0),
            Hap::pitch(5.0, 6.0, 72.0),
        ];
        let kept = visible_haps(&haps, 0.0, &window(), false);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].value, haps[0].value);
        assert_eq!(kept[1].value, haps[1].value);

        let kept = visible_haps(&haps, 0.0, &window(), true);
        assert_eq!(kept.len(), 1);
    }
}
