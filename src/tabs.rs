/// A closed, ordered set of tab values.
pub trait Category: Copy + Eq + 'static {
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;
}

/// Holds which member of a [`Category`] is showing. Exactly one member is
/// active at any time; the first member is active initially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSelector<C: Category> {
    active: C,
}

impl<C: Category> Default for TabSelector<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Category> TabSelector<C> {
    pub fn new() -> Self {
        Self { active: C::ALL[0] }
    }

    pub fn active(&self) -> C {
        self.active
    }

    pub fn index(&self) -> usize {
        C::ALL
            .iter()
            .position(|c| *c == self.active)
            .unwrap_or(0)
    }

    /// Returns whether the active tab changed.
    pub fn select(&mut self, tab: C) -> bool {
        if tab == self.active {
            return false;
        }
        self.active = tab;
        true
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        match C::ALL.get(index) {
            Some(tab) => self.select(*tab),
            None => false,
        }
    }

    pub fn next(&mut self) -> bool {
        let idx = (self.index() + 1) % C::ALL.len();
        self.select_index(idx)
    }

    pub fn prev(&mut self) -> bool {
        let len = C::ALL.len();
        let idx = (self.index() + len - 1) % len;
        self.select_index(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pane {
        Skills,
        Experience,
        Education,
    }

    impl Category for Pane {
        const ALL: &'static [Self] = &[Self::Skills, Self::Experience, Self::Education];

        fn label(&self) -> &'static str {
            match self {
                Self::Skills => "Skills",
                Self::Experience => "Experience",
                Self::Education => "Education",
            }
        }
    }

    fn visible(selector: &TabSelector<Pane>) -> Vec<Pane> {
        Pane::ALL
            .iter()
            .copied()
            .filter(|pane| *pane == selector.active())
            .collect()
    }

    #[test]
    fn first_member_is_active_initially() {
        let selector = TabSelector::<Pane>::new();
        assert_eq!(selector.active(), Pane::Skills);
        assert_eq!(selector.index(), 0);
    }

    #[test]
    fn exactly_one_block_visible_for_each_selection() {
        let mut selector = TabSelector::<Pane>::new();
        for pane in Pane::ALL {
            selector.select(*pane);
            assert_eq!(visible(&selector), vec![*pane]);
        }
    }

    #[test]
    fn reselecting_active_tab_is_a_no_op() {
        let mut selector = TabSelector::<Pane>::new();
        assert!(selector.select(Pane::Education));
        let before = selector.clone();
        assert!(!selector.select(Pane::Education));
        assert_eq!(selector, before);
    }

    #[test]
    fn next_and_prev_wrap() {
        let mut selector = TabSelector::<Pane>::new();
        selector.prev();
        assert_eq!(selector.active(), Pane::Education);
        selector.next();
        assert_eq!(selector.active(), Pane::Skills);
        assert!(!selector.select_index(7));
        assert_eq!(selector.active().label(), "Skills");
    }
}
