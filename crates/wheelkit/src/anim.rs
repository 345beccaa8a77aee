use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// CSS-style timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn coord(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(t: f64, p1: f64, p2: f64) -> f64 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Curve parameter whose x coordinate is `x`.
    fn solve_t(&self, x: f64) -> f64 {
        // newton first, bisection if the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < 1e-7 {
                return t;
            }
            let d = Self::slope(t, self.x1, self.x2);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = Self::coord(t, self.x1, self.x2);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }

    pub fn sample(&self, x: f64) -> f64 {
        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }
        Self::coord(self.solve_t(x), self.y1, self.y2)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, DeserializeFromStr, EnumString, EnumIter, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Ease {
    Linear,
    /// cubic-bezier(0.25, 0.1, 0.25, 1)
    #[default]
    Ease,
    EaseOut,
    EaseInOut,
}

impl Ease {
    pub fn curve(self) -> CubicBezier {
        match self {
            Ease::Linear => CubicBezier::new(0.0, 0.0, 1.0, 1.0),
            Ease::Ease => CubicBezier::new(0.25, 0.1, 0.25, 1.0),
            Ease::EaseOut => CubicBezier::new(0.0, 0.0, 0.58, 1.0),
            Ease::EaseInOut => CubicBezier::new(0.42, 0.0, 0.58, 1.0),
        }
    }

    pub fn sample(self, x: f64) -> f64 {
        match self {
            Ease::Linear => x.clamp(0.0, 1.0),
            _ => self.curve().sample(x),
        }
    }
}

/// A scalar animated from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: f64, to: f64, duration: Duration, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration,
            ease,
        }
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }

    pub fn sample(&self, elapsed: Duration) -> f64 {
        if self.is_finished(elapsed) {
            return self.to;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.ease.sample(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_curves_hit_endpoints() {
        for ease in Ease::iter() {
            assert_eq!(ease.sample(0.0), 0.0, "{ease}");
            assert_eq!(ease.sample(1.0), 1.0, "{ease}");
            assert_eq!(ease.sample(-3.0), 0.0, "{ease}");
            assert_eq!(ease.sample(7.0), 1.0, "{ease}");
        }
    }

    #[test]
    fn test_curves_are_monotonic() {
        for ease in Ease::iter() {
            let mut prev = 0.0;
            for i in 1..=100 {
                let y = ease.sample(i as f64 / 100.0);
                assert!(y + 1e-6 >= prev, "{ease} dips at {i}");
                prev = y;
            }
        }
    }

    #[test]
    fn test_ease_matches_known_points() {
        // symmetric curve passes through its midpoint
        assert!((Ease::EaseInOut.sample(0.5) - 0.5).abs() < 1e-4);
        // "ease" front-loads progress
        assert!(Ease::Ease.sample(0.5) > 0.75);
        assert!((Ease::Linear.sample(0.3) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_ease_parsing() {
        assert_eq!("ease".parse::<Ease>().unwrap(), Ease::Ease);
        assert_eq!("Ease-Out".parse::<Ease>().unwrap(), Ease::EaseOut);
        assert_eq!("ease-in-out".parse::<Ease>().unwrap(), Ease::EaseInOut);
        assert!("bouncy".parse::<Ease>().is_err());

        let parsed: Ease = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(parsed, Ease::Linear);
        assert_eq!(Ease::EaseInOut.to_string(), "ease-in-out");
    }

    #[test]
    fn test_tween() {
        let tween = Tween::new(0.0, 3645.0, Duration::from_secs(6), Ease::Ease);
        assert_eq!(tween.sample(Duration::ZERO), 0.0);
        assert_eq!(tween.sample(Duration::from_secs(6)), 3645.0);
        assert_eq!(tween.sample(Duration::from_secs(60)), 3645.0);
        assert!(tween.is_finished(Duration::from_secs(6)));

        let mid = tween.sample(Duration::from_secs(3));
        assert!(mid > 0.0 && mid < 3645.0);
    }
}
