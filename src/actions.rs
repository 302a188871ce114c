//! Player-triggered actions.
//!
//! The presentation layer maps its buttons onto these and hands them to
//! `GameEngine::apply`. The auto-mine tick is not an action; the clock
//! drives it directly.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Mine,
    Upgrade,
    Craft,
    Reset,
}

impl Action {
    pub fn all() -> &'static [Action] {
        &[Action::Mine, Action::Upgrade, Action::Craft, Action::Reset]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Mine => "mine",
            Action::Upgrade => "upgrade",
            Action::Craft => "craft",
            Action::Reset => "reset",
        }
    }

    /// Whether the action can fail for lack of resources.
    pub fn has_cost(&self) -> bool {
        matches!(self, Action::Upgrade | Action::Craft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_purchases_have_cost() {
        let costed: Vec<Action> = Action::all()
            .iter()
            .copied()
            .filter(|a| a.has_cost())
            .collect();
        assert_eq!(costed, vec![Action::Upgrade, Action::Craft]);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = Action::all().iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Action::all().len());
    }
}
