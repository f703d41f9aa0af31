use crate::card::CardHover;
use crate::layout::Category;

/// Identity of one card on the whole ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoverTarget {
    pub category: Category,
    pub index: usize,
}

impl HoverTarget {
    pub fn new(category: Category, index: usize) -> Self {
        Self { category, index }
    }
}

/// A card hover transition tagged with the sector it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEvent {
    pub category: Category,
    pub hover: CardHover,
}

impl HoverEvent {
    pub fn target(&self) -> HoverTarget {
        match self.hover {
            CardHover::Over(i) | CardHover::Out(i) => HoverTarget::new(self.category, i),
        }
    }
}

/// The single hovered card, if any. Entering replaces whatever was hovered;
/// exiting only clears when it comes from the recorded card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Option<HoverTarget>,
}

impl HoverState {
    pub fn current(&self) -> Option<HoverTarget> {
        self.current
    }

    pub fn is_hovered(&self, target: HoverTarget) -> bool {
        self.current == Some(target)
    }

    /// Returns whether the recorded target changed.
    pub fn apply(&mut self, event: HoverEvent) -> bool {
        let target = event.target();
        let next = match event.hover {
            CardHover::Over(_) => Some(target),
            CardHover::Out(_) if self.current == Some(target) => None,
            CardHover::Out(_) => self.current,
        };
        let changed = next != self.current;
        if changed {
            log::debug!("Hover {:?} -> {:?}", self.current, next);
        }
        self.current = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over(category: Category, i: usize) -> HoverEvent {
        HoverEvent {
            category,
            hover: CardHover::Over(i),
        }
    }

    fn out(category: Category, i: usize) -> HoverEvent {
        HoverEvent {
            category,
            hover: CardHover::Out(i),
        }
    }

    #[test]
    fn test_last_enter_wins() {
        let mut state = HoverState::default();
        assert!(state.apply(over(Category::Spring, 1)));
        assert!(state.apply(over(Category::Winter, 4)));
        assert_eq!(state.current(), Some(HoverTarget::new(Category::Winter, 4)));
        assert!(!state.is_hovered(HoverTarget::new(Category::Spring, 1)));
    }

    #[test]
    fn test_stale_exit_is_ignored() {
        let mut state = HoverState::default();
        state.apply(over(Category::Summer, 2));
        assert!(!state.apply(out(Category::Summer, 3)));
        assert!(!state.apply(out(Category::Autumn, 2)));
        assert_eq!(state.current(), Some(HoverTarget::new(Category::Summer, 2)));
        assert!(state.apply(out(Category::Summer, 2)));
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_reenter_same_card_is_not_a_change() {
        let mut state = HoverState::default();
        state.apply(over(Category::Spring, 0));
        assert!(!state.apply(over(Category::Spring, 0)));
        assert_eq!(state.current(), Some(HoverTarget::new(Category::Spring, 0)));
    }
}
