// Chunk: docs/chunks/sheet_normalization - Normalized sheet descriptors
//!
//! Normalization of host sheets.
//!
//! The host reports a [`RawSheet`] for every sheet it still knows about. The
//! navigator never renders raw sheets directly; it normalizes them into a
//! [`SheetDescriptor`] first. Normalization is where stale handles are caught:
//! a sheet the host no longer resolves, or one that has been detached from its
//! pane, fails with [`StaleSheet`] and the caller drops it from its group.

use std::collections::BTreeSet;
use std::path::PathBuf;

use thiserror::Error;

use crate::source::SheetSource;
use crate::types::{ItemKind, PaneId, SheetId};

/// Name used for sheets that have neither a name nor a backing file.
const UNTITLED: &str = "untitled";

/// What the host reports about a live sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    /// The pane hosting the sheet. `None` once the sheet is detached.
    pub pane: Option<PaneId>,
    /// Display name set by the host (tab title)
    pub name: Option<String>,
    /// Backing file, if any
    pub file: Option<PathBuf>,
    /// Short preview of the content (first line, image size, ...)
    pub preview: String,
    /// Content kind, when the host can tell
    pub kind: Option<ItemKind>,
    /// User-assigned tags
    pub tags: Vec<String>,
}

/// Normalized view of one open sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetDescriptor {
    pub id: SheetId,
    pub pane: PaneId,
    pub name: String,
    pub file: Option<PathBuf>,
    pub preview: String,
    pub kind: Option<ItemKind>,
    pub tags: BTreeSet<String>,
}

/// A sheet handle that no longer resolves to a live sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("sheet {sheet} no longer resolves to a live sheet")]
pub struct StaleSheet {
    pub sheet: SheetId,
}

/// Normalizes what the host reported for `id`.
///
/// `raw` is `None` when the host no longer knows the sheet. The name falls back
/// to the backing file's name, then to `"untitled"`. Blank tags are dropped.
pub fn normalize(id: SheetId, raw: Option<RawSheet>) -> Result<SheetDescriptor, StaleSheet> {
    let raw = raw.ok_or(StaleSheet { sheet: id })?;
    let pane = raw.pane.ok_or(StaleSheet { sheet: id })?;

    let name = raw
        .name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| {
            raw.file
                .as_ref()
                .and_then(|file| file.file_name())
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| UNTITLED.to_string());

    let tags = raw
        .tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    Ok(SheetDescriptor {
        id,
        pane,
        name,
        file: raw.file,
        preview: raw.preview,
        kind: raw.kind,
        tags,
    })
}

/// Looks `id` up in `source` and normalizes it.
pub fn resolve<S: SheetSource + ?Sized>(source: &S, id: SheetId) -> Result<SheetDescriptor, StaleSheet> {
    normalize(id, source.sheet(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_in_pane(pane: PaneId) -> RawSheet {
        RawSheet {
            pane: Some(pane),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_sheet_is_stale() {
        assert_eq!(normalize(7, None), Err(StaleSheet { sheet: 7 }));
    }

    #[test]
    fn test_detached_sheet_is_stale() {
        let raw = RawSheet {
            name: Some("main.rs".into()),
            ..Default::default()
        };
        assert_eq!(normalize(3, Some(raw)), Err(StaleSheet { sheet: 3 }));
    }

    #[test]
    fn test_name_prefers_host_name() {
        let raw = RawSheet {
            name: Some("Find Results".into()),
            file: Some(PathBuf::from("/tmp/results.txt")),
            ..raw_in_pane(1)
        };
        assert_eq!(normalize(1, Some(raw)).unwrap().name, "Find Results");
    }

    #[test]
    fn test_name_falls_back_to_file_name() {
        let raw = RawSheet {
            name: Some("   ".into()),
            file: Some(PathBuf::from("/project/src/lib.rs")),
            ..raw_in_pane(1)
        };
        assert_eq!(normalize(1, Some(raw)).unwrap().name, "lib.rs");
    }

    #[test]
    fn test_name_falls_back_to_untitled() {
        let sheet = normalize(1, Some(raw_in_pane(4))).unwrap();
        assert_eq!(sheet.name, "untitled");
        assert_eq!(sheet.pane, 4);
        assert_eq!(sheet.file, None);
    }

    #[test]
    fn test_tags_are_trimmed_and_deduplicated() {
        let raw = RawSheet {
            tags: vec!["wip".into(), " wip ".into(), "".into(), "review".into()],
            ..raw_in_pane(1)
        };
        let tags: Vec<_> = normalize(1, Some(raw)).unwrap().tags.into_iter().collect();
        assert_eq!(tags, vec!["review".to_string(), "wip".to_string()]);
    }
}
