// Chunk: docs/chunks/selection_session - Selection panel orchestration

//! compass: an "alt-tab" style navigator for editor sheets.
//!
//! The navigator keeps a most-recently-used stack of sheet groups per window
//! and, on request, shows them in a selection panel together with files that
//! are not open (recently closed ones and files found in the project folders).
//!
//! # Overview
//!
//! - [`Navigator`] is the entry point: `show`/`close` commands, the panel
//!   callbacks `on_highlight`/`on_done`, and host event hooks.
//! - [`Host`] is the contract the embedding editor implements.
//! - [`SelectionSession`] builds one panel list and resolves its callbacks.
//! - [`FileCache`] holds the files offered besides the open sheets.
//! - [`Settings`] is the validated configuration, loaded from JSON.
//!
//! The MRU stack itself lives in the `compass-stack` crate and is re-exported
//! here.
//!
//! # Example
//!
//! ```
//! use compass::{MemoryHost, Navigator, RawSheet, Settings};
//!
//! let mut host = MemoryHost::new();
//! host.add_window(1, Vec::new());
//! let a = host.open_sheet(1, RawSheet { pane: Some(0), name: Some("a.rs".into()), ..Default::default() });
//! let b = host.open_sheet(1, RawSheet { pane: Some(0), name: Some("b.rs".into()), ..Default::default() });
//!
//! let mut navigator = Navigator::new(Settings::default());
//! navigator.on_activated(&host, 1, a);
//! navigator.on_activated(&host, 1, b);
//!
//! // The panel opens on the previously used sheet.
//! assert!(navigator.show(&mut host, 1, true));
//! assert_eq!(host.panel().unwrap().initial_index, 1);
//!
//! // Committing it switches back to `a`.
//! assert_eq!(navigator.on_done(&mut host, Some(1)), Ok(1));
//! ```

mod error;
mod file_cache;
mod host;
mod item;
mod memory_host;
mod navigator;
pub mod scenario;
mod session;
mod settings;
mod state;

pub use compass_stack::{
    normalize, resolve, ItemKind, MruStack, PaneId, RawSheet, SheetDescriptor, SheetGroup, SheetId,
    SheetSource, StackRegistry, StaleSheet, WindowId,
};
pub use error::NavigatorError;
pub use file_cache::{should_refresh, CacheEntry, CacheOrigin, FileCache};
pub use host::Host;
pub use item::{folder_relative_label, CombinedList, ItemMeta, ListItem};
pub use memory_host::{HostCall, MemoryHost, ShownPanel};
pub use navigator::Navigator;
pub use session::{initial_index, SelectionSession, SessionState};
pub use settings::{ConfigError, FilesPluginSettings, PluginSettings, Settings};
pub use state::ProcessState;
