use serde::{Deserialize, Serialize};

/// A closed range of ray parameters or distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if the interval contains nothing (min > max).
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Narrows this interval to its overlap with `[lo, hi]`.
    pub fn intersect(&self, lo: f32, hi: f32) -> Interval {
        Interval::new(self.min.max(lo), self.max.min(hi))
    }

    /// Position of x within the interval as a fraction clamped to [0, 1].
    ///
    /// A degenerate interval acts as a step at `min`.
    pub fn fraction(&self, x: f32) -> f32 {
        let size = self.size();
        if size <= 0.0 {
            return if x < self.min { 0.0 } else { 1.0 };
        }
        ((x - self.min) / size).clamp(0.0, 1.0)
    }

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}
