// Chunk: docs/chunks/unopened_file_cache - Closed and unopened file cache
//!
//! Files offered by the navigator that are not open in the window.
//!
//! Two sources feed the cache of a window:
//! - **Recently closed files**, most recent first. Recorded as sheets close,
//!   kept in memory only.
//! - **Discovered files**, found by walking the window's project folders.
//!   The walk honours `.gitignore` files and skips hidden entries.
//!
//! A refresh builds the full entry list first and then swaps it in, so a
//! reader never sees a half-built list. Between refreshes the list may go
//! stale; files opened since the last refresh are filtered out when items are
//! generated.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use compass_stack::{ItemKind, SheetSource, WindowId};
use ignore::WalkBuilder;
use tracing::{debug, trace, warn};

use crate::host::Host;
use crate::item::{folder_relative_label, CombinedList, ItemMeta, ListItem};
use crate::settings::{FilesPluginSettings, Settings};

/// Where a cache entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOrigin {
    RecentlyClosed,
    Discovered,
}

/// A file eligible for opening from the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub path: PathBuf,
    pub origin: CacheOrigin,
}

/// Per-window cache of files that are not open.
#[derive(Debug, Default)]
pub struct FileCache {
    /// Last refreshed entry list per window
    snapshots: HashMap<WindowId, Vec<CacheEntry>>,
    /// Closed files per window, most recent first
    recently_closed: HashMap<WindowId, VecDeque<PathBuf>>,
}

/// Decides whether `show` rebuilds the cache before listing it.
///
/// Never true while the files plugin is disabled. Otherwise true when the cache
/// is rebuilt on every show and unopened files are not restricted to empty
/// windows, or when they are restricted and the window is empty.
pub fn should_refresh(settings: &Settings, open_sheet_count: usize) -> bool {
    let files = &settings.plugins.files;
    if !files.enabled {
        return false;
    }

    let empty_only = settings.only_show_unopened_files_on_empty_window;
    (!files.enable_cache && !empty_only) || (empty_only && open_sheet_count == 0)
}

/// Returns the backing files of every sheet open in `window`.
pub fn open_files<S: SheetSource + ?Sized>(source: &S, window: WindowId) -> HashSet<PathBuf> {
    source
        .open_sheets(window, None)
        .into_iter()
        .filter_map(|sheet| source.sheet(sheet)?.file)
        .collect()
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entries of the last refresh of `window`.
    pub fn entries(&self, window: WindowId) -> &[CacheEntry] {
        self.snapshots.get(&window).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Records that `path` was closed in `window`.
    ///
    /// Moves the path to the front if it was already recorded and keeps at most
    /// `capacity` paths.
    pub fn note_closed(&mut self, window: WindowId, path: PathBuf, capacity: usize) {
        let closed = self.recently_closed.entry(window).or_default();
        closed.retain(|p| p != &path);
        closed.push_front(path);
        closed.truncate(capacity);
    }

    /// Drops everything known about a closed window.
    pub fn forget_window(&mut self, window: WindowId) {
        self.snapshots.remove(&window);
        self.recently_closed.remove(&window);
    }

    /// Rebuilds the entry list of `window` and swaps it in.
    pub fn refresh<H: Host + ?Sized>(&mut self, host: &H, window: WindowId, settings: &FilesPluginSettings) {
        let open = open_files(host, window);
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        if let Some(closed) = self.recently_closed.get(&window) {
            for path in closed {
                if !open.contains(path) && seen.insert(path.clone()) {
                    entries.push(CacheEntry {
                        path: path.clone(),
                        origin: CacheOrigin::RecentlyClosed,
                    });
                }
            }
        }

        let closed_count = entries.len();
        let mut discovered = 0;
        'folders: for folder in host.folders(window) {
            for path in walk_files(&folder) {
                if discovered >= settings.max_files {
                    debug!(window, max_files = settings.max_files, "file walk truncated");
                    break 'folders;
                }
                if open.contains(&path) || !seen.insert(path.clone()) {
                    continue;
                }
                entries.push(CacheEntry {
                    path,
                    origin: CacheOrigin::Discovered,
                });
                discovered += 1;
            }
        }

        debug!(window, closed = closed_count, discovered, "file cache refreshed");
        self.snapshots.insert(window, entries);
    }

    /// Builds one panel row per cached file of `window` that is still not open.
    ///
    /// Labels are relative to the first of `folders` containing the file.
    pub fn generate_items(&self, window: WindowId, open: &HashSet<PathBuf>, folders: &[PathBuf]) -> CombinedList {
        let mut list = CombinedList::new();
        for entry in self.entries(window) {
            if open.contains(&entry.path) {
                trace!(path = %entry.path.display(), "skipping file opened since refresh");
                continue;
            }

            let annotation = match entry.origin {
                CacheOrigin::RecentlyClosed => "closed",
                CacheOrigin::Discovered => "unopened",
            };
            let item = ListItem {
                trigger: folder_relative_label(&entry.path, folders),
                kind: Some(ItemKind::Unopened),
                details: entry.path.display().to_string(),
                annotation: annotation.to_string(),
            };
            list.push(item, ItemMeta::Cached(entry.clone()));
        }
        list
    }

    /// True for rows that come from the cache.
    pub fn is_applicable(meta: &ItemMeta) -> bool {
        matches!(meta, ItemMeta::Cached(_))
    }

    /// Shows the file transiently, if the host can.
    pub fn on_highlight<H: Host + ?Sized>(entry: &CacheEntry, window: WindowId, host: &mut H) {
        if host.supports_file_preview() {
            host.preview_file(window, &entry.path);
        }
    }

    /// Opens the file for real.
    pub fn on_select<H: Host + ?Sized>(entry: &CacheEntry, window: WindowId, host: &mut H) {
        debug!(path = %entry.path.display(), "opening cached file");
        host.open_file(window, &entry.path);
    }
}

/// Lists the files under `root` in path order, honouring ignore files.
fn walk_files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkBuilder::new(root)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build()
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable path: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(enabled: bool, enable_cache: bool, empty_only: bool) -> Settings {
        let mut settings = Settings::default();
        settings.plugins.files.enabled = enabled;
        settings.plugins.files.enable_cache = enable_cache;
        settings.only_show_unopened_files_on_empty_window = empty_only;
        settings
    }

    // =========================================================================
    // Refresh policy
    // =========================================================================

    #[test]
    fn test_refresh_never_runs_when_disabled() {
        for enable_cache in [false, true] {
            for empty_only in [false, true] {
                for open in [0, 3] {
                    let settings = settings_with(false, enable_cache, empty_only);
                    assert!(!should_refresh(&settings, open));
                }
            }
        }
    }

    #[test]
    fn test_refresh_every_show_without_cache() {
        assert!(should_refresh(&settings_with(true, false, false), 0));
        assert!(should_refresh(&settings_with(true, false, false), 5));
    }

    #[test]
    fn test_cached_mode_skips_refresh_on_non_empty_window() {
        assert!(!should_refresh(&settings_with(true, true, false), 0));
        assert!(!should_refresh(&settings_with(true, true, false), 2));
    }

    #[test]
    fn test_empty_window_only_refreshes_empty_windows() {
        assert!(should_refresh(&settings_with(true, false, true), 0));
        assert!(!should_refresh(&settings_with(true, false, true), 1));
        assert!(should_refresh(&settings_with(true, true, true), 0));
    }

    // =========================================================================
    // Recently closed list
    // =========================================================================

    #[test]
    fn test_note_closed_moves_duplicates_to_front_and_caps() {
        let mut cache = FileCache::new();
        cache.note_closed(1, PathBuf::from("/a"), 2);
        cache.note_closed(1, PathBuf::from("/b"), 2);
        cache.note_closed(1, PathBuf::from("/a"), 2);
        cache.note_closed(1, PathBuf::from("/c"), 2);

        let closed: Vec<_> = cache.recently_closed[&1].iter().cloned().collect();
        assert_eq!(closed, vec![PathBuf::from("/c"), PathBuf::from("/a")]);
    }

    #[test]
    fn test_generate_items_skips_open_files() {
        let mut cache = FileCache::new();
        cache.snapshots.insert(
            1,
            vec![
                CacheEntry {
                    path: PathBuf::from("/w/a.rs"),
                    origin: CacheOrigin::RecentlyClosed,
                },
                CacheEntry {
                    path: PathBuf::from("/w/b.rs"),
                    origin: CacheOrigin::Discovered,
                },
            ],
        );

        let open: HashSet<_> = [PathBuf::from("/w/a.rs")].into_iter().collect();
        let list = cache.generate_items(1, &open, &[PathBuf::from("/w")]);

        assert_eq!(list.len(), 1);
        let (item, meta) = list.get(0).unwrap();
        assert_eq!(item.trigger, "b.rs");
        assert_eq!(item.annotation, "unopened");
        assert_eq!(item.kind, Some(ItemKind::Unopened));
        assert!(FileCache::is_applicable(meta));
    }

    #[test]
    fn test_unknown_window_has_no_entries() {
        let cache = FileCache::new();
        assert!(cache.entries(9).is_empty());
        assert!(cache.generate_items(9, &HashSet::new(), &[]).is_empty());
    }

    #[test]
    fn test_walk_files_is_sorted_and_skips_hidden() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src").join("b.rs"), "").unwrap();
        std::fs::write(dir.path().join("a.rs"), "").unwrap();
        std::fs::write(dir.path().join(".hidden"), "").unwrap();

        let files: Vec<_> = walk_files(dir.path())
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(files, vec![PathBuf::from("a.rs"), Path::new("src").join("b.rs")]);
    }
}
