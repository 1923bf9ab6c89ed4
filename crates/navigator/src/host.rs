// Chunk: docs/chunks/selection_session - Selection panel orchestration
//!
//! The host contract.
//!
//! The navigator never touches windows, panes or the panel widget directly.
//! Everything it reads or does goes through [`Host`], which the embedding
//! editor implements. Reads that the MRU stack also needs live in the
//! [`SheetSource`] supertrait.

use std::path::{Path, PathBuf};

use compass_stack::{PaneId, SheetId, SheetSource, WindowId};

use crate::item::ListItem;

/// Window, pane and panel operations the navigator relies on.
pub trait Host: SheetSource {
    /// Returns the sheets currently selected in `pane`.
    fn selected_sheets(&self, window: WindowId, pane: PaneId) -> Vec<SheetId>;

    /// Selects `sheets`, replacing the current selection.
    fn select_sheets(&mut self, window: WindowId, sheets: &[SheetId]);

    /// Gives input focus to `sheet`.
    fn focus_sheet(&mut self, window: WindowId, sheet: SheetId);

    /// Returns the pane holding input focus.
    fn active_pane(&self, window: WindowId) -> PaneId;

    /// Returns the project folders open in `window`.
    fn folders(&self, window: WindowId) -> Vec<PathBuf>;

    /// Opens `path` as a regular sheet.
    fn open_file(&mut self, window: WindowId, path: &Path);

    /// Whether the host can show a file transiently, without opening it for good.
    fn supports_file_preview(&self) -> bool {
        false
    }

    /// Shows `path` transiently. Only called when [`supports_file_preview`](Self::supports_file_preview) is true.
    fn preview_file(&mut self, _window: WindowId, _path: &Path) {}

    /// Opens the selection panel on `items` with `initial_index` highlighted.
    ///
    /// The host later reports highlights and the final pick back through
    /// [`Navigator::on_highlight`](crate::Navigator::on_highlight) and
    /// [`Navigator::on_done`](crate::Navigator::on_done).
    fn show_selection_list(&mut self, window: WindowId, items: &[ListItem], initial_index: usize);

    /// Hides the selection panel. The host reports the dismissal through `on_done(None)`.
    fn hide_selection_list(&mut self, window: WindowId);
}
