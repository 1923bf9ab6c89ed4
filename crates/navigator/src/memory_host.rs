// Chunk: docs/chunks/memory_host - In-memory host for tests and scenario replay
//!
//! A [`Host`] that keeps windows, panes and sheets in memory.
//!
//! It records every call the navigator makes into it, so tests and the replay
//! binary can check what the navigator did rather than only what it returned.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use compass_stack::{ItemKind, PaneId, RawSheet, SheetId, SheetSource, WindowId};

use crate::host::Host;
use crate::item::ListItem;

/// A call the navigator made into the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Select { window: WindowId, sheets: Vec<SheetId> },
    Focus { window: WindowId, sheet: SheetId },
    OpenFile { window: WindowId, path: PathBuf },
    PreviewFile { window: WindowId, path: PathBuf },
    ShowList { window: WindowId, len: usize, initial_index: usize },
    HideList { window: WindowId },
}

/// The panel as the host currently shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShownPanel {
    pub window: WindowId,
    pub items: Vec<ListItem>,
    pub initial_index: usize,
}

#[derive(Debug, Default)]
struct MemoryWindow {
    active_pane: PaneId,
    folders: Vec<PathBuf>,
    /// Selected sheets per pane
    selection: HashMap<PaneId, Vec<SheetId>>,
}

#[derive(Debug)]
struct MemorySheet {
    window: WindowId,
    raw: RawSheet,
}

/// In-memory editor host.
#[derive(Debug, Default)]
pub struct MemoryHost {
    windows: BTreeMap<WindowId, MemoryWindow>,
    /// Open sheets, in opening order
    sheets: BTreeMap<SheetId, MemorySheet>,
    next_sheet_id: SheetId,
    file_preview: bool,
    panel: Option<ShownPanel>,
    calls: Vec<HostCall>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self {
            next_sheet_id: 1,
            ..Default::default()
        }
    }

    /// Enables transient file previews.
    pub fn with_file_preview(mut self) -> Self {
        self.file_preview = true;
        self
    }

    pub fn add_window(&mut self, window: WindowId, folders: Vec<PathBuf>) {
        self.windows.insert(
            window,
            MemoryWindow {
                folders,
                ..Default::default()
            },
        );
    }

    pub fn set_active_pane(&mut self, window: WindowId, pane: PaneId) {
        if let Some(state) = self.windows.get_mut(&window) {
            state.active_pane = pane;
        }
    }

    /// Replaces the selection of `pane` without recording a call.
    pub fn set_selection(&mut self, window: WindowId, pane: PaneId, sheets: Vec<SheetId>) {
        if let Some(state) = self.windows.get_mut(&window) {
            state.selection.insert(pane, sheets);
        }
    }

    /// Opens a sheet with a host-chosen id.
    pub fn open_sheet(&mut self, window: WindowId, raw: RawSheet) -> SheetId {
        let id = self.next_sheet_id;
        self.insert_sheet(id, window, raw);
        id
    }

    /// Opens a sheet under a caller-chosen id.
    pub fn insert_sheet(&mut self, id: SheetId, window: WindowId, raw: RawSheet) {
        self.next_sheet_id = self.next_sheet_id.max(id + 1);
        self.sheets.insert(id, MemorySheet { window, raw });
    }

    /// Closes a sheet, returning what it was.
    pub fn close_sheet(&mut self, sheet: SheetId) -> Option<RawSheet> {
        let closed = self.sheets.remove(&sheet)?;
        for state in self.windows.values_mut() {
            for selection in state.selection.values_mut() {
                selection.retain(|&id| id != sheet);
            }
        }
        Some(closed.raw)
    }

    /// Detaches a sheet from its pane while keeping it listed as open, as hosts
    /// do briefly while a sheet moves between panes.
    pub fn detach_sheet(&mut self, sheet: SheetId) {
        if let Some(sheet) = self.sheets.get_mut(&sheet) {
            sheet.raw.pane = None;
        }
    }

    /// Returns the window hosting `sheet`.
    pub fn window_of(&self, sheet: SheetId) -> Option<WindowId> {
        self.sheets.get(&sheet).map(|sheet| sheet.window)
    }

    /// Returns the panel currently shown.
    pub fn panel(&self) -> Option<&ShownPanel> {
        self.panel.as_ref()
    }

    /// Removes the shown panel, as the panel widget does once it reports a pick.
    pub fn dismiss_panel(&mut self) -> Option<ShownPanel> {
        self.panel.take()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Returns and clears the recorded calls.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }
}

impl SheetSource for MemoryHost {
    fn open_sheets(&self, window: WindowId, pane: Option<PaneId>) -> Vec<SheetId> {
        self.sheets
            .iter()
            .filter(|(_, sheet)| sheet.window == window)
            .filter(|(_, sheet)| pane.is_none() || sheet.raw.pane == pane)
            .map(|(&id, _)| id)
            .collect()
    }

    fn sheet(&self, sheet: SheetId) -> Option<RawSheet> {
        self.sheets.get(&sheet).map(|sheet| sheet.raw.clone())
    }
}

impl Host for MemoryHost {
    fn selected_sheets(&self, window: WindowId, pane: PaneId) -> Vec<SheetId> {
        self.windows
            .get(&window)
            .and_then(|state| state.selection.get(&pane))
            .cloned()
            .unwrap_or_default()
    }

    fn select_sheets(&mut self, window: WindowId, sheets: &[SheetId]) {
        self.calls.push(HostCall::Select {
            window,
            sheets: sheets.to_vec(),
        });

        let pane = sheets.first().and_then(|id| self.sheets.get(id)).and_then(|sheet| sheet.raw.pane);
        if let (Some(pane), Some(state)) = (pane, self.windows.get_mut(&window)) {
            state.selection.insert(pane, sheets.to_vec());
        }
    }

    fn focus_sheet(&mut self, window: WindowId, sheet: SheetId) {
        self.calls.push(HostCall::Focus { window, sheet });

        let pane = self.sheets.get(&sheet).and_then(|sheet| sheet.raw.pane);
        if let (Some(pane), Some(state)) = (pane, self.windows.get_mut(&window)) {
            state.active_pane = pane;
        }
    }

    fn active_pane(&self, window: WindowId) -> PaneId {
        self.windows.get(&window).map_or(0, |state| state.active_pane)
    }

    fn folders(&self, window: WindowId) -> Vec<PathBuf> {
        self.windows
            .get(&window)
            .map(|state| state.folders.clone())
            .unwrap_or_default()
    }

    fn open_file(&mut self, window: WindowId, path: &Path) {
        self.calls.push(HostCall::OpenFile {
            window,
            path: path.to_path_buf(),
        });

        let pane = self.active_pane(window);
        let id = self.open_sheet(
            window,
            RawSheet {
                pane: Some(pane),
                file: Some(path.to_path_buf()),
                kind: Some(ItemKind::File),
                ..Default::default()
            },
        );
        self.set_selection(window, pane, vec![id]);
    }

    fn supports_file_preview(&self) -> bool {
        self.file_preview
    }

    fn preview_file(&mut self, window: WindowId, path: &Path) {
        self.calls.push(HostCall::PreviewFile {
            window,
            path: path.to_path_buf(),
        });
    }

    fn show_selection_list(&mut self, window: WindowId, items: &[ListItem], initial_index: usize) {
        self.calls.push(HostCall::ShowList {
            window,
            len: items.len(),
            initial_index,
        });
        self.panel = Some(ShownPanel {
            window,
            items: items.to_vec(),
            initial_index,
        });
    }

    fn hide_selection_list(&mut self, window: WindowId) {
        self.calls.push(HostCall::HideList { window });
        self.panel = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pane: PaneId, name: &str) -> RawSheet {
        RawSheet {
            pane: Some(pane),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_open_sheets_filters_by_window_and_pane() {
        let mut host = MemoryHost::new();
        host.add_window(1, Vec::new());
        host.add_window(2, Vec::new());
        let a = host.open_sheet(1, raw(0, "a"));
        let b = host.open_sheet(1, raw(1, "b"));
        let _c = host.open_sheet(2, raw(0, "c"));

        assert_eq!(host.open_sheets(1, None), vec![a, b]);
        assert_eq!(host.open_sheets(1, Some(1)), vec![b]);
    }

    #[test]
    fn test_close_sheet_clears_selection() {
        let mut host = MemoryHost::new();
        host.add_window(1, Vec::new());
        let a = host.open_sheet(1, raw(0, "a"));
        let b = host.open_sheet(1, raw(0, "b"));
        host.set_selection(1, 0, vec![a, b]);

        assert!(host.close_sheet(a).is_some());
        assert_eq!(host.selected_sheets(1, 0), vec![b]);
        assert!(host.sheet(a).is_none());
        assert!(host.close_sheet(a).is_none());
    }

    #[test]
    fn test_detached_sheet_stays_listed_without_pane() {
        let mut host = MemoryHost::new();
        host.add_window(1, Vec::new());
        let a = host.open_sheet(1, raw(0, "a"));
        host.detach_sheet(a);

        assert_eq!(host.open_sheets(1, None), vec![a]);
        assert!(host.open_sheets(1, Some(0)).is_empty());
        assert_eq!(host.sheet(a).unwrap().pane, None);
    }

    #[test]
    fn test_insert_sheet_keeps_ids_unique() {
        let mut host = MemoryHost::new();
        host.add_window(1, Vec::new());
        host.insert_sheet(10, 1, raw(0, "a"));
        assert_eq!(host.open_sheet(1, raw(0, "b")), 11);
    }

    #[test]
    fn test_focus_moves_active_pane() {
        let mut host = MemoryHost::new();
        host.add_window(1, Vec::new());
        let a = host.open_sheet(1, raw(3, "a"));
        host.focus_sheet(1, a);
        assert_eq!(host.active_pane(1), 3);
        assert_eq!(host.take_calls(), vec![HostCall::Focus { window: 1, sheet: a }]);
        assert!(host.calls().is_empty());
    }
}
