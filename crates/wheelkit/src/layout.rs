use std::borrow::Cow;

/// Appended to labels cut down by [`truncate_label`].
pub const ELLIPSIS: &str = "...";

/// Wheels with more options than this get the short label budget.
pub const CROWDED_THRESHOLD: usize = 10;
pub const CROWDED_LABEL_LEN: usize = 10;
pub const ROOMY_LABEL_LEN: usize = 15;

/// One angular segment of the wheel.
///
/// Angles are in wheel-frame degrees: 0 along the wheel's +x axis, growing
/// clockwise on screen, so 270 is the top of an unrotated wheel.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub start_angle: f64,
    pub end_angle: f64,
    pub label_angle: f64,
    pub label: String,
}

impl Slice {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.start_angle..self.end_angle).contains(&angle)
    }
}

pub fn degrees_per_item(count: usize) -> f64 {
    360.0 / count as f64
}

pub fn max_label_len(count: usize) -> usize {
    if count > CROWDED_THRESHOLD {
        CROWDED_LABEL_LEN
    } else {
        ROOMY_LABEL_LEN
    }
}

/// Cuts `text` to `max` characters plus [`ELLIPSIS`]. Counts chars, not
/// rendered width.
pub fn truncate_label(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &text[..cut], ELLIPSIS)),
        None => Cow::Borrowed(text),
    }
}

/// Lays `items` out around the circle in order. An empty list yields an empty
/// layout.
pub fn layout<S: AsRef<str>>(items: &[S]) -> Vec<Slice> {
    if items.is_empty() {
        return Vec::new();
    }

    let step = degrees_per_item(items.len());
    let max_len = max_label_len(items.len());

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let start_angle = index as f64 * step;
            Slice {
                index,
                start_angle,
                end_angle: (index + 1) as f64 * step,
                label_angle: start_angle + step / 2.0,
                label: truncate_label(item.as_ref(), max_len).into_owned(),
            }
        })
        .collect()
}

/// Index of the slice covering `angle` on a wheel of `count` slices.
pub fn slice_at(angle: f64, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    let index = (normalized / degrees_per_item(count)).floor() as usize;
    Some(index.min(count - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn items(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn test_empty_layout() {
        let empty: [&str; 0] = [];
        assert!(layout(&empty).is_empty());
    }

    #[test]
    fn test_slices_tile_the_circle() {
        for n in 1..=64 {
            let slices = layout(&items(n));
            assert_eq!(slices.len(), n);
            assert_eq!(slices[0].start_angle, 0.0);

            let step = 360.0 / n as f64;
            let total: f64 = slices.iter().map(Slice::span).sum();
            assert!((total - 360.0).abs() < EPS, "n={n} total={total}");

            for pair in slices.windows(2) {
                assert!((pair[0].end_angle - pair[1].start_angle).abs() < EPS);
            }
            for s in &slices {
                assert!((s.span() - step).abs() < EPS);
            }
            assert!((slices[n - 1].end_angle - 360.0).abs() < EPS);
        }
    }

    #[test]
    fn test_label_angle_is_slice_center() {
        for n in 1..=40 {
            for s in layout(&items(n)) {
                let expected = s.start_angle + 180.0 / n as f64;
                assert!((s.label_angle - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_long_label_truncated_on_small_wheel() {
        let menu = ["Pepperoni Pizza Supreme", "Tacos", "Ramen", "Pho", "Curry"];
        let slices = layout(&menu);
        assert_eq!(slices[0].label, "Pepperoni Pizza...");
        assert_eq!(slices[1].label, "Tacos");
    }

    #[test]
    fn test_short_label_kept_on_crowded_wheel() {
        let mut menu = items(14);
        menu.insert(3, "Sushi".to_string());
        let slices = layout(&menu);
        assert_eq!(slices.len(), 15);
        assert_eq!(slices[3].label, "Sushi");
        // "option 10" is 9 chars, under the crowded budget
        assert_eq!(slices[11].label, "option 10");
    }

    #[test]
    fn test_label_budget_switches_above_ten() {
        assert_eq!(max_label_len(10), 15);
        assert_eq!(max_label_len(11), 10);

        let text = "Chicken Katsu Curry";
        assert_eq!(truncate_label(text, max_label_len(10)), "Chicken Katsu C...");
        assert_eq!(truncate_label(text, max_label_len(11)), "Chicken Ka...");
    }

    #[test]
    fn test_truncation_counts_chars() {
        assert_eq!(truncate_label("crème brûlée deluxe", 12), "crème brûlée...");
        assert_eq!(truncate_label("exactly fifteen", 15), "exactly fifteen");
        assert!(matches!(truncate_label("short", 15), Cow::Borrowed(_)));
    }

    #[test]
    fn test_slice_at() {
        assert_eq!(slice_at(10.0, 0), None);
        assert_eq!(slice_at(0.0, 4), Some(0));
        assert_eq!(slice_at(89.9, 4), Some(0));
        assert_eq!(slice_at(90.0, 4), Some(1));
        assert_eq!(slice_at(359.9, 4), Some(3));
        assert_eq!(slice_at(-45.0, 4), Some(3));
        assert_eq!(slice_at(720.0 + 200.0, 4), Some(2));
        assert_eq!(slice_at(-1e-18, 3), Some(2));
    }
}
