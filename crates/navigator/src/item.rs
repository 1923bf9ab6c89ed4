// Chunk: docs/chunks/selection_session - Selection panel orchestration
//!
//! The combined selection list.
//!
//! The panel shows one flat list mixing sheet groups, per-file breakouts and
//! cached unopened files. Each row has a render payload ([`ListItem`]) and the
//! thing it stands for ([`ItemMeta`]). [`CombinedList`] keeps the two
//! index-aligned: rows can only be added as pairs, so `items[i]` was always
//! derived from `meta[i]`.

use std::fmt;
use std::path::{Path, PathBuf};

use compass_stack::{ItemKind, SheetGroup};

use crate::file_cache::CacheEntry;

/// Render payload of one panel row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// Main label
    pub trigger: String,
    pub kind: Option<ItemKind>,
    /// Secondary line under the label
    pub details: String,
    /// Right-aligned hint
    pub annotation: String,
}

impl fmt::Display for ListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.trigger)?;
        if !self.annotation.is_empty() {
            write!(f, "  [{}]", self.annotation)?;
        }
        if !self.details.is_empty() {
            write!(f, "  -- {}", self.details)?;
        }
        Ok(())
    }
}

/// What a panel row stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMeta {
    /// A group of open sheets
    Group(SheetGroup),
    /// A file from the unopened-file cache
    Cached(CacheEntry),
}

/// Panel rows and their origins, index-aligned.
#[derive(Debug, Clone, Default)]
pub struct CombinedList {
    items: Vec<ListItem>,
    meta: Vec<ItemMeta>,
}

impl CombinedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one row.
    pub fn push(&mut self, item: ListItem, meta: ItemMeta) {
        self.items.push(item);
        self.meta.push(meta);
    }

    /// Moves every row of `other` to the end of this list.
    pub fn append(&mut self, mut other: CombinedList) {
        self.items.append(&mut other.items);
        self.meta.append(&mut other.meta);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn meta(&self) -> &[ItemMeta] {
        &self.meta
    }

    /// Returns the row at `index`.
    pub fn get(&self, index: usize) -> Option<(&ListItem, &ItemMeta)> {
        Some((self.items.get(index)?, self.meta.get(index)?))
    }
}

/// Returns `path` relative to the first of `folders` containing it.
///
/// Paths outside every folder are shown in full.
pub fn folder_relative_label(path: &Path, folders: &[PathBuf]) -> String {
    folders
        .iter()
        .find_map(|folder| path.strip_prefix(folder).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_cache::CacheOrigin;

    #[test]
    fn test_rows_stay_aligned_through_append() {
        let mut list = CombinedList::new();
        list.push(
            ListItem {
                trigger: "a".into(),
                ..Default::default()
            },
            ItemMeta::Group(SheetGroup::single(1)),
        );

        let mut tail = CombinedList::new();
        tail.push(
            ListItem {
                trigger: "b".into(),
                ..Default::default()
            },
            ItemMeta::Cached(CacheEntry {
                path: PathBuf::from("/p/b"),
                origin: CacheOrigin::Discovered,
            }),
        );
        list.append(tail);

        assert_eq!(list.len(), 2);
        assert_eq!(list.items().len(), list.meta().len());
        let (item, meta) = list.get(1).unwrap();
        assert_eq!(item.trigger, "b");
        assert!(matches!(meta, ItemMeta::Cached(_)));
        assert!(list.get(2).is_none());
    }

    #[test]
    fn test_folder_relative_label_strips_first_matching_folder() {
        let folders = vec![PathBuf::from("/work/app"), PathBuf::from("/work")];
        assert_eq!(
            folder_relative_label(Path::new("/work/app/src/main.rs"), &folders),
            Path::new("src").join("main.rs").display().to_string()
        );
        assert_eq!(
            folder_relative_label(Path::new("/work/lib.rs"), &folders),
            "lib.rs"
        );
    }

    #[test]
    fn test_folder_relative_label_outside_folders_is_full_path() {
        let folders = vec![PathBuf::from("/work")];
        assert_eq!(
            folder_relative_label(Path::new("/etc/hosts"), &folders),
            Path::new("/etc/hosts").display().to_string()
        );
    }

    #[test]
    fn test_display_includes_annotation_and_details() {
        let item = ListItem {
            trigger: "main.rs + lib.rs".into(),
            kind: Some(ItemKind::File),
            details: "fn main() {".into(),
            annotation: "wip".into(),
        };
        assert_eq!(item.to_string(), "main.rs + lib.rs  [wip]  -- fn main() {");
    }
}
