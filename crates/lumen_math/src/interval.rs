/// A range of ray parameters or channel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Ray parameters in front of the origin and closer than `max`.
    pub fn forward(max: f64) -> Self {
        Self::new(0.0, max)
    }

    /// True if `x` lies strictly between the bounds.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Clamp `x` into `[min, max]`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}
