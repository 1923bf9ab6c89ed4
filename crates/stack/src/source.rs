// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping

use crate::sheet::RawSheet;
use crate::types::{PaneId, SheetId, WindowId};

/// Read-only view of the host's open sheets.
///
/// This is the part of the host contract the stack needs to stay honest: the
/// stack only remembers ordering, the host decides which sheets exist.
pub trait SheetSource {
    /// Returns the sheets open in `window`, in host order.
    ///
    /// With `Some(pane)`, only sheets in that pane are returned.
    fn open_sheets(&self, window: WindowId, pane: Option<PaneId>) -> Vec<SheetId>;

    /// Returns what the host knows about `sheet`, or `None` once it is closed.
    fn sheet(&self, sheet: SheetId) -> Option<RawSheet>;
}
