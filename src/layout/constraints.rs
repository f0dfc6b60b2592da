#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub min_height: f32,
    pub max_width: f32,
    pub max_height: f32,
}

impl Constraints {
    pub fn new(min_width: f32, min_height: f32, max_width: f32, max_height: f32) -> Self {
        Self {
            min_width,
            min_height,
            max_width,
            max_height,
        }
    }

    pub fn tight(size: Size) -> Self {
        Self {
            min_width: size.width,
            min_height: size.height,
            max_width: size.width,
            max_height: size.height,
        }
    }

    pub fn loose(size: Size) -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: size.width,
            max_height: size.height,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            min_width: 0.0,
            min_height: 0.0,
            max_width: f32::INFINITY,
            max_height: f32::INFINITY,
        }
    }

    /// Same horizontal bounds, but any height is allowed.
    pub fn with_unbounded_height(&self) -> Self {
        Self {
            min_height: 0.0,
            max_height: f32::INFINITY,
            ..*self
        }
    }

    /// Narrow the vertical bounds to `bounds`. The maximum wins if they cross.
    pub fn with_height_bounds(&self, bounds: HeightBounds) -> Self {
        let max_height = self.max_height.min(bounds.max);
        Self {
            min_height: self.min_height.max(bounds.min).min(max_height),
            max_height,
            ..*self
        }
    }

    pub fn constrain(&self, size: Size) -> Size {
        Size {
            width: size.width.max(self.min_width).min(self.max_width),
            height: size.height.max(self.min_height).min(self.max_height),
        }
    }

    pub fn is_tight(&self) -> bool {
        self.min_width == self.max_width && self.min_height == self.max_height
    }
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Minimum and maximum height a widget accepts.
///
/// The default is fully open: `0.0..=f32::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightBounds {
    pub min: f32,
    pub max: f32,
}

impl HeightBounds {
    pub const OPEN: HeightBounds = HeightBounds {
        min: 0.0,
        max: f32::INFINITY,
    };

    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamp a height into these bounds. `max` wins when the bounds cross.
    pub fn clamp(&self, height: f32) -> f32 {
        height.max(self.min).min(self.max)
    }
}

impl Default for HeightBounds {
    fn default() -> Self {
        Self::OPEN
    }
}
