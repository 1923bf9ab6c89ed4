// Chunk: docs/chunks/scenario_replay - Scripted navigator sessions
//!
//! Scripted navigator sessions against the in-memory host.
//!
//! A scenario is a JSON file describing the windows and sheets of an editor
//! and a list of steps: host events, commands and panel callbacks. Replaying
//! it prints every panel the navigator shows and every host call it makes,
//! which makes ordering and preview behaviour easy to inspect by hand.
//!
//! ```json
//! {
//!     "windows": [{
//!         "id": 1,
//!         "folders": ["/work"],
//!         "sheets": [
//!             {"id": 1, "file": "/work/main.rs", "tags": ["wip"]},
//!             {"id": 2, "file": "/work/lib.rs"}
//!         ]
//!     }],
//!     "steps": [
//!         {"activate": {"window": 1, "sheet": 1}},
//!         {"activate": {"window": 1, "sheet": 2}},
//!         {"show": {"window": 1}},
//!         {"highlight": {"index": 1}},
//!         {"done": {"index": null}}
//!     ]
//! }
//! ```

use std::io::{self, Write};
use std::path::PathBuf;

use compass_stack::{ItemKind, PaneId, RawSheet, SheetId, WindowId};
use serde::{Deserialize, Serialize};

use crate::memory_host::MemoryHost;
use crate::navigator::Navigator;
use crate::settings::Settings;

// =============================================================================
// Scenario File
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSpec {
    pub id: WindowId,
    #[serde(default)]
    pub active_pane: PaneId,
    #[serde(default)]
    pub folders: Vec<PathBuf>,
    #[serde(default)]
    pub sheets: Vec<SheetSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetSpec {
    pub id: SheetId,
    #[serde(default)]
    pub pane: PaneId,
    pub name: Option<String>,
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub preview: String,
    pub kind: Option<KindSpec>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Serializable representation of a sheet kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindSpec {
    File,
    Image,
    Html,
    Scratch,
}

impl From<KindSpec> for ItemKind {
    fn from(kind: KindSpec) -> Self {
        match kind {
            KindSpec::File => ItemKind::File,
            KindSpec::Image => ItemKind::Image,
            KindSpec::Html => ItemKind::Html,
            KindSpec::Scratch => ItemKind::Scratch,
        }
    }
}

impl SheetSpec {
    fn to_raw(&self) -> RawSheet {
        RawSheet {
            pane: Some(self.pane),
            name: self.name.clone(),
            file: self.file.clone(),
            preview: self.preview.clone(),
            kind: self.kind.map(ItemKind::from),
            tags: self.tags.clone(),
        }
    }
}

fn forward_default() -> bool {
    true
}

/// One scripted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// `sheet` gains focus
    Activate { window: WindowId, sheet: SheetId },
    /// The user selects several sheets in a pane (no navigator involvement)
    Select {
        window: WindowId,
        pane: PaneId,
        sheets: Vec<SheetId>,
    },
    /// The user closes a sheet
    CloseSheet { sheet: SheetId },
    /// The `show` command
    Show {
        window: WindowId,
        #[serde(default = "forward_default")]
        forward: bool,
    },
    /// The panel highlights a row; `null` stands for the host's -1
    Highlight { index: Option<usize> },
    /// The panel reports a pick; `null` is a dismissal
    Done { index: Option<usize> },
    /// The `close` command
    Close {
        window: WindowId,
        #[serde(default)]
        reset: bool,
    },
}

// =============================================================================
// Replay
// =============================================================================

/// A navigator wired to an in-memory host built from a scenario.
pub struct Replay {
    host: MemoryHost,
    navigator: Navigator,
}

impl Replay {
    pub fn new(scenario: &Scenario, settings: Settings) -> Self {
        let mut host = MemoryHost::new();
        for window in &scenario.windows {
            host.add_window(window.id, window.folders.clone());
            host.set_active_pane(window.id, window.active_pane);
            for sheet in &window.sheets {
                host.insert_sheet(sheet.id, window.id, sheet.to_raw());
            }
        }

        let mut navigator = Navigator::new(settings);
        for window in &scenario.windows {
            navigator.on_window_loaded(&host, window.id);
        }

        Self { host, navigator }
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Runs `steps` in order, describing each one on `out`.
    ///
    /// Protocol violations are reported and the replay continues.
    pub fn run<W: Write>(&mut self, steps: &[Step], out: &mut W) -> io::Result<()> {
        for step in steps {
            self.step(step, out)?;
            for call in self.host.take_calls() {
                writeln!(out, "    host: {:?}", call)?;
            }
        }
        Ok(())
    }

    fn step<W: Write>(&mut self, step: &Step, out: &mut W) -> io::Result<()> {
        match step {
            Step::Activate { window, sheet } => {
                writeln!(out, "activate sheet {} in window {}", sheet, window)?;
                self.navigator.on_activated(&self.host, *window, *sheet);
            }
            Step::Select { window, pane, sheets } => {
                writeln!(out, "select {:?} in pane {}", sheets, pane)?;
                self.host.set_selection(*window, *pane, sheets.clone());
            }
            Step::CloseSheet { sheet } => {
                writeln!(out, "close sheet {}", sheet)?;
                let window = self.host.window_of(*sheet);
                if let (Some(window), Some(raw)) = (window, self.host.close_sheet(*sheet)) {
                    self.navigator.on_closed(window, *sheet, raw.file.as_deref());
                }
            }
            Step::Show { window, forward } => {
                writeln!(out, "show window {} ({})", window, if *forward { "forward" } else { "backward" })?;
                if self.navigator.show(&mut self.host, *window, *forward) {
                    self.print_panel(out)?;
                } else {
                    writeln!(out, "    nothing to show")?;
                }
            }
            Step::Highlight { index } => {
                writeln!(out, "highlight {:?}", index)?;
                if let Err(err) = self.navigator.on_highlight(&mut self.host, *index) {
                    writeln!(out, "    error: {}", err)?;
                }
            }
            Step::Done { index } => {
                writeln!(out, "done {:?}", index)?;
                self.host.dismiss_panel();
                self.finish(*index, out)?;
            }
            Step::Close { window, reset } => {
                writeln!(out, "close window {} (reset: {})", window, reset)?;
                self.navigator.close(&mut self.host, *window, *reset);
                // Hiding the panel makes the host report a dismissal.
                if self.navigator.session().is_some() && self.host.panel().is_none() {
                    self.finish(None, out)?;
                }
            }
        }
        Ok(())
    }

    fn finish<W: Write>(&mut self, index: Option<usize>, out: &mut W) -> io::Result<()> {
        match self.navigator.on_done(&mut self.host, index) {
            Ok(row) => writeln!(out, "    committed row {}", row),
            Err(err) => writeln!(out, "    error: {}", err),
        }
    }

    fn print_panel<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(panel) = self.host.panel() else {
            return Ok(());
        };
        for (index, item) in panel.items.iter().enumerate() {
            let marker = if index == panel.initial_index { '>' } else { ' ' };
            writeln!(out, "  {} {:>2}. {}", marker, index, item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "windows": [{
            "id": 1,
            "folders": ["/work"],
            "sheets": [
                {"id": 1, "file": "/work/main.rs", "kind": "file"},
                {"id": 2, "file": "/work/lib.rs", "kind": "file"}
            ]
        }],
        "steps": [
            {"activate": {"window": 1, "sheet": 1}},
            {"activate": {"window": 1, "sheet": 2}},
            {"show": {"window": 1}},
            {"highlight": {"index": null}},
            {"done": {"index": null}}
        ]
    }"#;

    #[test]
    fn test_scenario_parses() {
        let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
        assert_eq!(scenario.windows.len(), 1);
        assert_eq!(scenario.windows[0].sheets[1].kind, Some(KindSpec::File));
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(scenario.steps[2], Step::Show { window: 1, forward: true }));
    }

    #[test]
    fn test_replay_reports_violation_and_commits_highlight() {
        let scenario: Scenario = serde_json::from_str(SCENARIO).unwrap();
        let mut replay = Replay::new(&scenario, Settings::default());
        let mut out = Vec::new();
        replay.run(&scenario.steps, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(">  1. main.rs"), "panel should start on the previous sheet:\n{}", text);
        assert!(text.contains("error: cannot highlight index -1"), "{}", text);
        assert!(text.contains("committed row 1"), "{}", text);
        assert!(replay.navigator().session().is_none());
    }
}
