// Chunk: docs/chunks/mru_stack - MRU stack and sheet grouping

/// Host-issued handle of an open sheet.
pub type SheetId = u64;

/// Host-issued handle of a window.
pub type WindowId = u64;

/// Host-issued handle of a pane (a subdivision of a window hosting sheets).
pub type PaneId = u64;

/// The kind of content a list item stands for.
///
/// Sheets report one of the first four kinds; `Unopened` marks files offered
/// from the unopened-file cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A text view backed by (or destined for) a file
    File,
    /// An image sheet
    Image,
    /// An HTML sheet
    Html,
    /// A text view with no backing file
    Scratch,
    /// A file that is not open in the window
    Unopened,
}
