// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping
//!
//! The most-recently-used stack of one window.

use tracing::trace;

use crate::group::SheetGroup;
use crate::types::SheetId;

/// Ordered groups of one window, most recently used first.
///
/// Invariants:
/// - a sheet appears in at most one group
/// - no group is empty
#[derive(Debug, Clone, Default)]
pub struct MruStack {
    groups: Vec<SheetGroup>,
}

impl MruStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the groups, most recent first.
    pub fn groups(&self) -> &[SheetGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the index of the group holding `sheet`.
    pub fn position_of(&self, sheet: SheetId) -> Option<usize> {
        self.groups.iter().position(|group| group.contains(sheet))
    }

    pub fn contains(&self, sheet: SheetId) -> bool {
        self.position_of(sheet).is_some()
    }

    /// Moves `group` to the front.
    ///
    /// Its sheets are first taken out of whatever groups held them; groups left
    /// empty by that are pruned. An empty `group` is ignored.
    pub fn promote_to_front(&mut self, group: SheetGroup) {
        if group.is_empty() {
            return;
        }

        for existing in &mut self.groups {
            if existing.overlaps(&group) {
                existing.retain(|id| !group.contains(id));
            }
        }
        self.groups.retain(|existing| !existing.is_empty());

        trace!(sheets = ?group.sheets(), "promoting group to front");
        self.groups.insert(0, group);
    }

    /// Removes `sheet` from whichever group holds it.
    ///
    /// The group is removed from the stack when this empties it. Returns
    /// whether the sheet was tracked.
    pub fn remove(&mut self, sheet: SheetId) -> bool {
        let Some(index) = self.position_of(sheet) else {
            return false;
        };

        self.groups[index].remove(sheet);
        if self.groups[index].is_empty() {
            trace!(sheet, index, "pruning emptied group");
            self.groups.remove(index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_no_duplicates(stack: &MruStack) {
        let mut seen = HashSet::new();
        for group in stack.groups() {
            assert!(!group.is_empty(), "empty group left in stack");
            for &sheet in group.sheets() {
                assert!(seen.insert(sheet), "sheet {} appears twice", sheet);
            }
        }
    }

    // =========================================================================
    // promote_to_front
    // =========================================================================

    #[test]
    fn test_promote_puts_group_in_front() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::single(1));
        stack.promote_to_front(SheetGroup::single(2));
        stack.promote_to_front(SheetGroup::single(3));

        let fronts: Vec<_> = stack.groups().iter().map(|g| g.sheets()[0]).collect();
        assert_eq!(fronts, vec![3, 2, 1]);
    }

    #[test]
    fn test_promote_existing_group_moves_it() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::new([1, 2]));
        stack.promote_to_front(SheetGroup::single(3));
        stack.promote_to_front(SheetGroup::new([2, 1]).with_focus(1));

        assert_eq!(stack.len(), 2);
        assert_eq!(stack.groups()[0], SheetGroup::new([1, 2]));
        assert_eq!(stack.groups()[0].focused(), Some(1));
        assert_no_duplicates(&stack);
    }

    #[test]
    fn test_promote_steals_sheets_from_other_groups() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::new([1, 2]));
        stack.promote_to_front(SheetGroup::new([3, 4]));
        stack.promote_to_front(SheetGroup::new([2, 3]));

        assert_eq!(stack.groups()[0].sheets(), &[2, 3]);
        assert_eq!(stack.groups()[1].sheets(), &[4]);
        assert_eq!(stack.groups()[2].sheets(), &[1]);
        assert_no_duplicates(&stack);
    }

    #[test]
    fn test_promote_prunes_groups_it_empties() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::single(1));
        stack.promote_to_front(SheetGroup::single(2));
        stack.promote_to_front(SheetGroup::new([1, 2]));

        assert_eq!(stack.len(), 1);
        assert_no_duplicates(&stack);
    }

    #[test]
    fn test_promote_empty_group_is_ignored() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::new([]));
        assert!(stack.is_empty());
    }

    // =========================================================================
    // remove
    // =========================================================================

    #[test]
    fn test_remove_last_sheet_prunes_group() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::single(1));
        stack.promote_to_front(SheetGroup::new([2, 3]));

        assert!(stack.remove(1));
        assert_eq!(stack.len(), 1);
        assert!(stack.remove(2));
        assert_eq!(stack.groups()[0].sheets(), &[3]);
        assert!(stack.remove(3));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_untracked_sheet_is_noop() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::single(1));
        assert!(!stack.remove(42));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_position_of_finds_holder() {
        let mut stack = MruStack::new();
        stack.promote_to_front(SheetGroup::new([1, 2]));
        stack.promote_to_front(SheetGroup::single(3));

        assert_eq!(stack.position_of(2), Some(1));
        assert_eq!(stack.position_of(3), Some(0));
        assert!(!stack.contains(9));
    }
}
