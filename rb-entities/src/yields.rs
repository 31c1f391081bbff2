use crate::fraction::Fraction;

pub type YieldValue = u32;

/// The serving-size counter of a recipe. The default is the value the page
/// was generated with; the current value drives ingredient scaling.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Yield {
    default: YieldValue,
    current: YieldValue,
}

impl Yield {
    pub fn new(default: YieldValue) -> Self {
        debug_assert!(default >= 1);
        Self {
            default,
            current: default,
        }
    }

    pub const fn default_value(self) -> YieldValue {
        self.default
    }

    pub const fn current(self) -> YieldValue {
        self.current
    }

    pub fn is_default(self) -> bool {
        self.current == self.default
    }

    /// Returns `false` if the value did not change.
    pub fn increase(&mut self) -> bool {
        let next = self.current.saturating_add(1);
        let changed = next != self.current;
        self.current = next;
        changed
    }

    /// Floors at one serving. Returns `false` if the value did not change.
    pub fn decrease(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current = self.default;
    }

    /// The factor by which ingredient quantities are rescaled.
    pub fn scale_factor(self) -> Fraction {
        Fraction::new(self.current, self.default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrease_floors_at_one() {
        let mut yields = Yield::new(2);
        assert!(yields.decrease());
        assert!(!yields.decrease());
        assert_eq!(yields.current(), 1);
    }

    #[test]
    fn scale_factor_tracks_current_over_default() {
        let mut yields = Yield::new(4);
        yields.increase();
        yields.increase();
        assert_eq!(yields.scale_factor(), Fraction::new(6, 4));
        yields.reset();
        assert!(yields.is_default());
        assert!(yields.scale_factor().is_identity());
    }
}
