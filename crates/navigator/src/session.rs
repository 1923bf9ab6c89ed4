// Chunk: docs/chunks/selection_session - Selection panel orchestration
//!
//! One invocation of the navigator panel.
//!
//! A [`SelectionSession`] is built synchronously when the user asks for the
//! panel, then lives while the host shows it. The host reports highlights and
//! the final pick later, possibly after other host events closed sheets, so
//! every sheet handle is re-resolved before it is acted on.
//!
//! # State Machine
//!
//! ```text
//! Idle ──build()──> Building ──open()──> Open ──on_done(Some)──> Committed
//!   ^                  │                   │
//!   └── empty list ────┘                   └──on_done(None)──> Cancelled
//! ```
//!
//! Committing and cancelling run the same code: a dismissal commits the
//! highlighted (or first) row.
//!
//! # List Layout
//!
//! The rows are, in order:
//! 1. one row per sheet group of the MRU snapshot
//! 2. with tags enabled, one row per file of every group
//! 3. the unopened-file cache

use std::collections::BTreeSet;
use std::path::PathBuf;

use compass_stack::{resolve, SheetDescriptor, SheetGroup, SheetId, StackRegistry, WindowId};
use tracing::{debug, trace};

use crate::error::NavigatorError;
use crate::file_cache::{self, FileCache};
use crate::host::Host;
use crate::item::{folder_relative_label, CombinedList, ItemMeta, ListItem};
use crate::settings::Settings;
use crate::state::ProcessState;

/// Separator between member names in a group label.
const GROUP_LABEL_SEPARATOR: &str = " + ";

/// Separator between the tags and the file in a per-file label.
const TAG_PREFIX_SEPARATOR: &str = " | ";

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The list is being assembled; nothing is shown yet
    Building,
    /// The panel is shown and callbacks are expected
    Open,
    /// The user picked a row
    Committed,
    /// The panel was dismissed; the highlighted or first row was committed
    Cancelled,
}

/// The panel list of one navigator invocation and what to do with it.
#[derive(Debug)]
pub struct SelectionSession {
    window: WindowId,
    list: CombinedList,
    /// Sheets selected in the active pane when the session was built
    initial_selection: Vec<SheetId>,
    initial_index: usize,
    state: SessionState,
}

/// Returns the row the panel starts on for a stack of `stack_len` groups.
///
/// Backward navigation starts on the last group; otherwise the first, or the
/// second when jumping to the most recent sheet.
pub fn initial_index(jump_to_most_recent: bool, forward: bool, stack_len: usize) -> usize {
    if !forward {
        stack_len.saturating_sub(1)
    } else if jump_to_most_recent {
        1
    } else {
        0
    }
}

impl SelectionSession {
    /// Assembles the panel list for `window`.
    ///
    /// Sheets the host closed without telling the navigator, and stale sheets
    /// met along the way, are removed from `registry`. May refresh
    /// `cache`, following [`file_cache::should_refresh`]. Returns `None` when
    /// there is nothing to show.
    pub fn build<H: Host + ?Sized>(
        host: &H,
        registry: &mut StackRegistry,
        cache: &mut FileCache,
        settings: &Settings,
        window: WindowId,
        forward: bool,
    ) -> Option<Self> {
        registry.prune_closed(host, window);

        let active_pane = host.active_pane(window);
        let pane = settings.only_show_items_in_focused_group.then_some(active_pane);
        let groups = registry.snapshot(host, window, pane);
        let initial_selection = host.selected_sheets(window, active_pane);
        let folders = host.folders(window);
        let selected_index = initial_index(settings.jump_to_most_recent_on_show, forward, groups.len());

        let mut group_rows = CombinedList::new();
        let mut file_rows = CombinedList::new();

        for mut group in groups {
            let mut members = Vec::with_capacity(group.len());
            for &sheet in group.sheets() {
                match resolve(host, sheet) {
                    Ok(descriptor) => members.push(descriptor),
                    Err(stale) => {
                        debug!(window, sheet = stale.sheet, "dropping stale sheet");
                        registry.remove(window, stale.sheet);
                    }
                }
            }
            if members.is_empty() {
                continue;
            }
            group.retain(|id| members.iter().any(|member| member.id == id));

            let row = GroupRow::new(&members, settings.enable_tags);
            if settings.enable_tags {
                for member in &members {
                    file_rows.push(row.file_item(member, &folders), ItemMeta::Group(group.clone()));
                }
            }
            group_rows.push(row.item, ItemMeta::Group(group));
        }

        let open_sheet_count = host.open_sheets(window, None).len();
        if file_cache::should_refresh(settings, open_sheet_count) {
            cache.refresh(host, window, &settings.plugins.files);
        }

        let mut list = group_rows;
        list.append(file_rows);
        if cache_rows_visible(settings, open_sheet_count) {
            let open = file_cache::open_files(host, window);
            list.append(cache.generate_items(window, &open, &folders));
        }

        if list.is_empty() {
            debug!(window, "nothing to show");
            return None;
        }

        let initial_index = selected_index.min(list.len() - 1);
        debug!(window, rows = list.len(), initial_index, "selection list built");
        Some(Self {
            window,
            list,
            initial_selection,
            initial_index,
            state: SessionState::Building,
        })
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn list(&self) -> &CombinedList {
        &self.list
    }

    pub fn initial_index(&self) -> usize {
        self.initial_index
    }

    pub fn initial_selection(&self) -> &[SheetId] {
        &self.initial_selection
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Hands the list to the host panel.
    pub fn open<H: Host + ?Sized>(&mut self, host: &mut H, state: &mut ProcessState) {
        state.panel_open = true;
        state.active = true;
        state.highlighted_index = self.initial_index;
        self.state = SessionState::Open;
        host.show_selection_list(self.window, self.list.items(), self.initial_index);
    }

    /// Handles the host highlighting `index`.
    ///
    /// With preview enabled, the live sheets of a highlighted group are selected
    /// only when its first sheet is live and in the active pane; otherwise the
    /// selection from before the panel opened is restored.
    pub fn on_highlight<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        state: &mut ProcessState,
        registry: &mut StackRegistry,
        settings: &Settings,
        index: Option<usize>,
    ) -> Result<(), NavigatorError> {
        let index = index.ok_or(NavigatorError::NothingHighlighted)?;
        let (_, meta) = self.list.get(index).ok_or(NavigatorError::IndexOutOfRange {
            index,
            len: self.list.len(),
        })?;

        state.highlighted_index = index;
        if !settings.preview_on_highlight {
            return Ok(());
        }

        match meta {
            ItemMeta::Cached(entry) => FileCache::on_highlight(entry, self.window, host),
            ItemMeta::Group(group) => {
                let live = live_members(&*host, registry, self.window, group);
                let active_pane = host.active_pane(self.window);
                let in_active_pane = group
                    .first()
                    .filter(|sheet| live.contains(sheet))
                    .and_then(|sheet| resolve(&*host, sheet).ok())
                    .is_some_and(|head| head.pane == active_pane);

                if in_active_pane {
                    trace!(index, "previewing group");
                    host.select_sheets(self.window, &live);
                } else {
                    trace!(index, "restoring initial selection");
                    host.select_sheets(self.window, &self.initial_selection);
                }
            }
        }
        Ok(())
    }

    /// Handles the host committing `index`, or dismissing the panel (`None`).
    ///
    /// Returns the row that was committed. The panel counts as closed even when
    /// the index is rejected.
    pub fn on_done<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        state: &mut ProcessState,
        registry: &mut StackRegistry,
        index: Option<usize>,
    ) -> Result<usize, NavigatorError> {
        let resolved = state.resolve_done_index(index);
        self.state = if index.is_some() {
            SessionState::Committed
        } else {
            SessionState::Cancelled
        };
        state.active = false;
        state.panel_open = false;

        let (_, meta) = self.list.get(resolved).ok_or(NavigatorError::IndexOutOfRange {
            index: resolved,
            len: self.list.len(),
        })?;
        debug!(window = self.window, index = resolved, dismissed = index.is_none(), "session done");

        match meta {
            ItemMeta::Cached(entry) => FileCache::on_select(entry, self.window, host),
            ItemMeta::Group(group) => {
                let live = live_members(&*host, registry, self.window, group);
                if live.is_empty() {
                    debug!(window = self.window, "committed group has closed");
                    return Ok(resolved);
                }

                host.select_sheets(self.window, &live);
                if let Some(focused) = group.focused().filter(|sheet| live.contains(sheet)) {
                    host.focus_sheet(self.window, focused);
                }
            }
        }
        Ok(resolved)
    }
}

/// Returns the members of `group` that still resolve, dropping the rest from `registry`.
fn live_members<H: Host + ?Sized>(
    host: &H,
    registry: &mut StackRegistry,
    window: WindowId,
    group: &SheetGroup,
) -> Vec<SheetId> {
    group
        .sheets()
        .iter()
        .copied()
        .filter(|&sheet| match resolve(host, sheet) {
            Ok(_) => true,
            Err(stale) => {
                debug!(window, sheet = stale.sheet, "dropping stale sheet");
                registry.remove(window, stale.sheet);
                false
            }
        })
        .collect()
}

/// Whether cache rows are listed at all.
///
/// Cache rows need the files plugin; with `only_show_unopened_files_on_empty_window`
/// they are listed for empty windows only.
fn cache_rows_visible(settings: &Settings, open_sheet_count: usize) -> bool {
    settings.plugins.files.enabled
        && (!settings.only_show_unopened_files_on_empty_window || open_sheet_count == 0)
}

/// The group row of one group and what its per-file rows share.
struct GroupRow {
    item: ListItem,
    tags: BTreeSet<String>,
}

impl GroupRow {
    fn new(members: &[SheetDescriptor], enable_tags: bool) -> Self {
        let trigger = members
            .iter()
            .map(|member| member.name.as_str())
            .collect::<Vec<_>>()
            .join(GROUP_LABEL_SEPARATOR);
        let details = members
            .iter()
            .map(|member| member.preview.as_str())
            .find(|preview| !preview.is_empty())
            .unwrap_or_default()
            .to_string();
        let kind = members.iter().find_map(|member| member.kind);
        let tags: BTreeSet<String> = members.iter().flat_map(|member| member.tags.iter().cloned()).collect();
        let annotation = if enable_tags {
            tags.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
        } else {
            String::new()
        };

        Self {
            item: ListItem {
                trigger,
                kind,
                details,
                annotation,
            },
            tags,
        }
    }

    /// The row listing `member` on its own.
    fn file_item(&self, member: &SheetDescriptor, folders: &[PathBuf]) -> ListItem {
        let label = member
            .file
            .as_deref()
            .map(|file| folder_relative_label(file, folders))
            .unwrap_or_else(|| member.name.clone());
        let trigger = if self.tags.is_empty() {
            label
        } else {
            let tags = self.tags.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
            format!("{}{}{}", tags, TAG_PREFIX_SEPARATOR, label)
        };

        ListItem {
            trigger,
            kind: self.item.kind,
            details: self.item.trigger.clone(),
            annotation: self.item.annotation.clone(),
        }
    }
}
