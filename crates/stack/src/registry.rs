// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping
//!
//! Per-window stacks and live snapshots.
//!
//! The registry is the ordering source of truth, but not the source of truth
//! for which sheets exist: sheets can close between the time a stack was last
//! updated and the time it is read. [`StackRegistry::snapshot`] therefore reads
//! the host's open sheets every time and reconciles the remembered order with
//! them.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::group::SheetGroup;
use crate::source::SheetSource;
use crate::stack::MruStack;
use crate::types::{PaneId, SheetId, WindowId};

/// One [`MruStack`] per window, created on first access.
#[derive(Debug, Default)]
pub struct StackRegistry {
    stacks: HashMap<WindowId, MruStack>,
}

impl StackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stack of `window`, if one was created.
    pub fn stack(&self, window: WindowId) -> Option<&MruStack> {
        self.stacks.get(&window)
    }

    /// Returns the stack of `window`, creating it if needed.
    pub fn stack_mut(&mut self, window: WindowId) -> &mut MruStack {
        self.stacks.entry(window).or_default()
    }

    /// Moves `group` to the front of the window's stack.
    pub fn promote(&mut self, window: WindowId, group: SheetGroup) {
        self.stack_mut(window).promote_to_front(group);
    }

    /// Removes `sheet` from the window's stack. Returns whether it was tracked.
    pub fn remove(&mut self, window: WindowId, sheet: SheetId) -> bool {
        self.stacks
            .get_mut(&window)
            .is_some_and(|stack| stack.remove(sheet))
    }

    /// Forgets the stack of a closed window.
    pub fn remove_window(&mut self, window: WindowId) {
        self.stacks.remove(&window);
    }

    /// Drops the sheets the host no longer lists as open in `window`, in any pane.
    ///
    /// Catches sheets that closed without a close event reaching the registry.
    /// Returns how many sheets were dropped.
    pub fn prune_closed<S: SheetSource + ?Sized>(&mut self, source: &S, window: WindowId) -> usize {
        let Some(stack) = self.stacks.get_mut(&window) else {
            return 0;
        };

        let live: HashSet<SheetId> = source.open_sheets(window, None).into_iter().collect();
        let closed: Vec<SheetId> = stack
            .groups()
            .iter()
            .flat_map(|group| group.sheets().iter().copied())
            .filter(|sheet| !live.contains(sheet))
            .collect();
        for &sheet in &closed {
            stack.remove(sheet);
        }

        if !closed.is_empty() {
            debug!(window, pruned = closed.len(), "dropped closed sheets");
        }
        closed.len()
    }

    /// Materializes the window's stack against live host state.
    ///
    /// - Members the host no longer lists as open in scope are left out, and
    ///   groups left empty are skipped.
    /// - Open sheets the stack has never seen are appended as singleton groups,
    ///   in host order.
    ///
    /// With `Some(pane)`, only sheets open in that pane are in scope. The stack
    /// itself is not modified.
    pub fn snapshot<S: SheetSource + ?Sized>(
        &self,
        source: &S,
        window: WindowId,
        pane: Option<PaneId>,
    ) -> Vec<SheetGroup> {
        let live = source.open_sheets(window, pane);
        let live_set: HashSet<SheetId> = live.iter().copied().collect();
        let mut seen = HashSet::new();
        let mut groups = Vec::new();

        if let Some(stack) = self.stacks.get(&window) {
            for group in stack.groups() {
                let mut group = group.clone();
                group.retain(|id| live_set.contains(&id));
                if group.is_empty() {
                    continue;
                }
                seen.extend(group.sheets().iter().copied());
                groups.push(group);
            }
        }

        let tracked = groups.len();
        for sheet in live {
            if seen.insert(sheet) {
                groups.push(SheetGroup::single(sheet));
            }
        }

        debug!(
            window,
            ?pane,
            tracked,
            untracked = groups.len() - tracked,
            "stack snapshot"
        );
        groups
    }
}
