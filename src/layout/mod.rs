mod constraints;

pub use constraints::{Constraints, HeightBounds, Size};

/// How a widget wants to use the space offered along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Policy {
    /// Use exactly the size hint.
    Fixed,
    /// Prefer the size hint, but accept whatever the parent offers.
    #[default]
    Preferred,
    /// Take all the space offered.
    Expanding,
}

/// Per-axis sizing policy of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePolicy {
    pub horizontal: Policy,
    pub vertical: Policy,
}

impl SizePolicy {
    pub const fn new(horizontal: Policy, vertical: Policy) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Resolve the width to use given the size hint and the space offered.
    pub fn resolve_width(&self, hint: f32, constraints: &Constraints) -> f32 {
        let width = match self.horizontal {
            Policy::Fixed | Policy::Preferred => hint,
            Policy::Expanding if constraints.max_width.is_finite() => constraints.max_width,
            Policy::Expanding => hint,
        };
        width.max(constraints.min_width).min(constraints.max_width)
    }

    /// Resolve the height to use given the size hint and the space offered.
    pub fn resolve_height(&self, hint: f32, constraints: &Constraints) -> f32 {
        let height = match self.vertical {
            Policy::Fixed | Policy::Preferred => hint,
            Policy::Expanding if constraints.max_height.is_finite() => constraints.max_height,
            Policy::Expanding => hint,
        };
        height.max(constraints.min_height).min(constraints.max_height)
    }
}

/// Cross axis alignment for stacked layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAxisAlignment {
    Start,
    Center,
    End,
    Stretch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expanding_takes_offered_width() {
        let policy = SizePolicy::new(Policy::Expanding, Policy::Fixed);
        let c = Constraints::loose(Size::new(300.0, 100.0));
        assert_eq!(policy.resolve_width(120.0, &c), 300.0);
        assert_eq!(policy.resolve_height(40.0, &c), 40.0);
    }

    #[test]
    fn test_expanding_without_bound_uses_hint() {
        let policy = SizePolicy::new(Policy::Expanding, Policy::Expanding);
        let c = Constraints::unbounded();
        assert_eq!(policy.resolve_width(120.0, &c), 120.0);
        assert_eq!(policy.resolve_height(40.0, &c), 40.0);
    }

    #[test]
    fn test_fixed_is_still_clamped_by_parent() {
        let policy = SizePolicy::new(Policy::Fixed, Policy::Fixed);
        let c = Constraints::new(0.0, 0.0, 50.0, 20.0);
        assert_eq!(policy.resolve_width(120.0, &c), 50.0);
        assert_eq!(policy.resolve_height(40.0, &c), 20.0);
    }
}
