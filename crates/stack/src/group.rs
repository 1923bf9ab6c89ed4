// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping
//!
//! Sheet groups.
//!
//! A [`SheetGroup`] is an ordered, deduplicated cluster of sheets that the
//! navigator treats as one slot. Switching to a group selects all of its sheets
//! at once and focuses the member that had focus when the group was recorded.

use crate::types::SheetId;

/// An ordered set of sheets switched to as one unit.
///
/// Identity is the set of member sheets: two groups holding the same sheets in
/// a different order, or with a different focused member, compare equal.
#[derive(Debug, Clone, Default)]
pub struct SheetGroup {
    /// Member sheets, in selection order, without duplicates
    sheets: Vec<SheetId>,
    /// The member to focus when the group is switched to. Always a member.
    focused: Option<SheetId>,
}

impl SheetGroup {
    /// Creates a group from `sheets`, dropping repeated handles.
    pub fn new(sheets: impl IntoIterator<Item = SheetId>) -> Self {
        let mut group = Self::default();
        for sheet in sheets {
            if !group.sheets.contains(&sheet) {
                group.sheets.push(sheet);
            }
        }
        group
    }

    /// Creates a one-sheet group focused on that sheet.
    pub fn single(sheet: SheetId) -> Self {
        Self {
            sheets: vec![sheet],
            focused: Some(sheet),
        }
    }

    /// Designates `sheet` as the focused member.
    ///
    /// Ignored when `sheet` is not a member.
    pub fn with_focus(mut self, sheet: SheetId) -> Self {
        if self.contains(sheet) {
            self.focused = Some(sheet);
        }
        self
    }

    pub fn sheets(&self) -> &[SheetId] {
        &self.sheets
    }

    /// Returns the first member, whose pane decides where the group is previewed.
    pub fn first(&self) -> Option<SheetId> {
        self.sheets.first().copied()
    }

    pub fn focused(&self) -> Option<SheetId> {
        self.focused
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn contains(&self, sheet: SheetId) -> bool {
        self.sheets.contains(&sheet)
    }

    /// Removes `sheet` from the group. Returns whether it was a member.
    pub fn remove(&mut self, sheet: SheetId) -> bool {
        let before = self.sheets.len();
        self.sheets.retain(|&id| id != sheet);
        if self.focused == Some(sheet) {
            self.focused = None;
        }
        self.sheets.len() != before
    }

    /// Keeps only the members for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(SheetId) -> bool) {
        self.sheets.retain(|&id| keep(id));
        if let Some(focused) = self.focused {
            if !self.sheets.contains(&focused) {
                self.focused = None;
            }
        }
    }

    /// Returns true if the two groups share at least one sheet.
    pub fn overlaps(&self, other: &SheetGroup) -> bool {
        self.sheets.iter().any(|&id| other.contains(id))
    }
}

impl PartialEq for SheetGroup {
    fn eq(&self, other: &Self) -> bool {
        self.sheets.len() == other.sheets.len() && self.sheets.iter().all(|&id| other.contains(id))
    }
}

impl Eq for SheetGroup {}
