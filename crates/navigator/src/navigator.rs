// Chunk: docs/chunks/navigator_commands - show/close commands and host event hooks
//!
//! The navigator's command surface.
//!
//! [`Navigator`] is what the embedding editor talks to. It owns every piece of
//! navigator state: the per-window MRU stacks, the unopened-file cache, the
//! [`ProcessState`] flags and the selection session currently shown, if any.
//!
//! Key bindings reach it through [`show`](Navigator::show) and
//! [`close`](Navigator::close); the panel widget reports back through
//! [`on_highlight`](Navigator::on_highlight) and [`on_done`](Navigator::on_done);
//! focus and close events keep the stacks current through the `on_*` hooks.

use std::path::Path;

use compass_stack::{resolve, SheetGroup, SheetId, StackRegistry, WindowId};
use tracing::{debug, warn};

use crate::error::NavigatorError;
use crate::file_cache::FileCache;
use crate::host::Host;
use crate::session::SelectionSession;
use crate::settings::Settings;
use crate::state::ProcessState;

/// MRU navigator state and commands.
#[derive(Debug)]
pub struct Navigator {
    settings: Settings,
    state: ProcessState,
    registry: StackRegistry,
    cache: FileCache,
    session: Option<SelectionSession>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Navigator {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            state: ProcessState::default(),
            registry: StackRegistry::new(),
            cache: FileCache::new(),
            session: None,
        }
    }

    /// Applies new settings and resets the panel state, as on plugin reload.
    ///
    /// The MRU stacks and the file cache are kept.
    pub fn reload(&mut self, settings: Settings) {
        debug!("reloading navigator");
        self.settings = settings;
        self.state.reset();
        self.session = None;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    pub fn registry(&self) -> &StackRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Returns the session currently shown, if any.
    pub fn session(&self) -> Option<&SelectionSession> {
        self.session.as_ref()
    }

    /// Marks whether the host's open panel is the navigator's.
    pub fn set_active(&mut self, active: bool) {
        self.state.active = active;
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Opens the panel for `window`.
    ///
    /// `forward` is false when navigating backward through the stack. Returns
    /// false, without touching the host panel, when there is nothing to list.
    pub fn show<H: Host + ?Sized>(&mut self, host: &mut H, window: WindowId, forward: bool) -> bool {
        let built = SelectionSession::build(
            &*host,
            &mut self.registry,
            &mut self.cache,
            &self.settings,
            window,
            forward,
        );
        let Some(mut session) = built else {
            return false;
        };

        if self.session.is_some() {
            debug!(window, "replacing open session");
        }
        session.open(host, &mut self.state);
        self.session = Some(session);
        true
    }

    /// Hides the navigator's panel.
    ///
    /// With `reset`, the dismissal that follows commits the first row instead
    /// of the highlighted one. Ignored when the navigator is not active.
    pub fn close<H: Host + ?Sized>(&mut self, host: &mut H, window: WindowId, reset: bool) {
        if !self.state.active {
            debug!(window, "close ignored, navigator not active");
            return;
        }
        self.state.reset_on_close = reset;
        host.hide_selection_list(window);
    }

    // =========================================================================
    // Panel callbacks
    // =========================================================================

    /// Relays a highlight from the host panel.
    pub fn on_highlight<H: Host + ?Sized>(&mut self, host: &mut H, index: Option<usize>) -> Result<(), NavigatorError> {
        let Some(session) = self.session.as_mut() else {
            warn!("highlight with no open session");
            return Err(NavigatorError::NoSession);
        };

        session
            .on_highlight(host, &mut self.state, &mut self.registry, &self.settings, index)
            .inspect_err(|err| warn!(?index, "highlight rejected: {}", err))
    }

    /// Relays the final pick (`Some`) or a dismissal (`None`) from the host panel.
    ///
    /// Ends the session. Returns the row that was committed.
    pub fn on_done<H: Host + ?Sized>(&mut self, host: &mut H, index: Option<usize>) -> Result<usize, NavigatorError> {
        let Some(mut session) = self.session.take() else {
            warn!("done with no open session");
            return Err(NavigatorError::NoSession);
        };

        session
            .on_done(host, &mut self.state, &mut self.registry, index)
            .inspect_err(|err| warn!(?index, "commit rejected: {}", err))
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Records that `sheet` gained focus.
    ///
    /// The sheets selected alongside it in its pane become the front group,
    /// focused on `sheet`. Ignored while the panel is open, since previewing
    /// rows moves focus around without the user settling on anything.
    pub fn on_activated<H: Host + ?Sized>(&mut self, host: &H, window: WindowId, sheet: SheetId) {
        if self.state.panel_open {
            return;
        }
        let Ok(descriptor) = resolve(host, sheet) else {
            debug!(window, sheet, "activated sheet is already stale");
            return;
        };

        let selected = host.selected_sheets(window, descriptor.pane);
        let group = if selected.contains(&sheet) {
            SheetGroup::new(selected)
        } else {
            SheetGroup::single(sheet)
        };
        self.registry.promote(window, group.with_focus(sheet));
    }

    /// Records that `sheet` closed. `file` is the file it was showing, if any.
    pub fn on_closed(&mut self, window: WindowId, sheet: SheetId, file: Option<&Path>) {
        self.registry.remove(window, sheet);
        if let Some(file) = file {
            let capacity = self.settings.plugins.files.max_recently_closed;
            self.cache.note_closed(window, file.to_path_buf(), capacity);
        }
    }

    /// Primes the file cache of a newly loaded window when caching is on.
    pub fn on_window_loaded<H: Host + ?Sized>(&mut self, host: &H, window: WindowId) {
        let files = &self.settings.plugins.files;
        if files.enabled && files.enable_cache {
            self.cache.refresh(host, window, files);
        }
    }

    /// Forgets everything about a closed window.
    pub fn on_window_closed(&mut self, window: WindowId) {
        self.registry.remove_window(window);
        self.cache.forget_window(window);
        if self.session.as_ref().is_some_and(|session| session.window() == window) {
            self.session = None;
            self.state.panel_open = false;
            self.state.active = false;
        }
    }
}
