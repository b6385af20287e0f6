//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the serpdeck library and Zellij.
//! It maps keys to library events according to the current input mode, runs
//! the keyword source and mutation commands through `run_command`, and feeds
//! their results back into [`handle_event`].
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for `Key`, `RunCommandResult`, `PermissionRequestResult`
//! 3. **Permissions granted**: Run the keyword source
//! 4. **Update**: Translate events, delegate to the library, execute actions
//! 5. **Render**: Call the library render function
//!
//! # Command Results
//!
//! Every command carries a context map with `kind` (`source` or a mutation
//! kind) and the `domain` it ran for. Results for a domain other than the
//! current one are dropped.
//!
//! # Pipes
//!
//! - `serpdeck::domain <domain>`: switch to another domain
//! - `serpdeck::device <desktop|mobile>`: show a device tab
//! - `serpdeck::sort <key>`: set the sort key
//! - `serpdeck::reload`: re-run the keyword source
//!
//! # Keybindings
//!
//! Global:
//! - `Ctrl+n` / `Ctrl+p`: Move down / up
//!
//! Normal mode:
//! - `j`/`k`/`Down`/`Up`: Move cursor
//! - `Space`: Toggle row selection, `a`: toggle all visible rows
//! - `Tab`: Switch device, `s`: cycle sort
//! - `/`: Search, `f`: filter picker, `c`: clear filters
//! - `r`: Refresh, `x`/`Delete`: remove, `*`: favorite, `t`: tags, `n`: add keywords
//! - `Enter`: Details, `R`: reload, `Esc`: clear selection, `q`: close
//!
//! Search mode: type to filter, `Enter` keeps the query, `Esc` clears it.
//!
//! Filter picker: `j`/`k` move, `Space` toggles, `c` clears, `Esc` closes.
//!
//! Removal confirmation: `y`/`Enter` removes, `n`/`Esc` cancels.
//!
//! Tag manager: type a tag, `Enter` adds (empty input saves), `Tab` completes,
//! `Esc` cancels.
//!
//! Add keywords: type one keyword per line, `Enter` on an empty line sends
//! them, `Tab` moves between keyword and country, `Left`/`Right` switch
//! device, `Esc` cancels.

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use serpdeck::infrastructure::CommandSet;
use serpdeck::{
    handle_event, Action, Config, Device, Event, InputMode, MutationKind, MutationOutcome,
    MutationRequest, SortKey,
};

register_plugin!(State);

/// Context value marking the keyword source command.
const SOURCE_KIND: &str = "source";

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with the configured commands.
struct State {
    app: serpdeck::AppState,
    commands: CommandSet,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: serpdeck::initialize(&Config::default()),
            commands: CommandSet::default(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        serpdeck::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            domain = %config.domain,
            has_source = config.commands.source.is_some(),
            mutations = config.commands.mutations.len(),
            "parsed configuration"
        );
        self.app = serpdeck::initialize(&config);
        self.commands = config.commands;

        request_permission(&[PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::RunCommandResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::RunCommandResult(exit_code, stdout, stderr, context) => {
                match self.map_command_result_event(exit_code, &stdout, &stderr, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("permissions granted - loading keywords");
                    Event::Reload
                }
                PermissionStatus::Denied => {
                    tracing::warn!("permissions denied - keyword source cannot run");
                    Event::SourceFailed {
                        error: "permission to run commands was denied".to_string(),
                    }
                }
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        let payload = pipe_message.payload.unwrap_or_default();
        let payload = payload.trim();
        tracing::debug!(name = %pipe_message.name, payload = %payload, "pipe message");

        let event = match pipe_message.name.as_str() {
            "serpdeck::domain" if !payload.is_empty() => Event::DomainChanged {
                domain: payload.to_string(),
            },
            "serpdeck::device" => match payload.parse::<Device>() {
                Ok(device) => Event::SetDevice(device),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring device pipe message");
                    return false;
                }
            },
            "serpdeck::sort" => Event::SetSort(SortKey::parse_lenient(payload)),
            "serpdeck::reload" => Event::Reload,
            _ => return false,
        };

        self.dispatch(&event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        serpdeck::ui::render(&self.app, rows, cols, chrono::Utc::now().timestamp());
    }
}

impl State {
    /// Runs an event through the library and executes the resulting actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render,
                    "event handled"
                );
                actions
                    .iter()
                    .fold(should_render, |render, action| self.execute_action(action) || render)
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::RunCommandResult(..) => "RunCommandResult".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events for the current input mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, mode = ?self.app.input_mode, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        match self.app.input_mode {
            InputMode::Normal => Self::map_normal_key(key.bare_key),
            mode if mode.captures_text() => Some(match key.bare_key {
                BareKey::Enter => Event::Submit,
                BareKey::Esc => Event::Escape,
                BareKey::Backspace => Event::Backspace,
                BareKey::Tab => Event::Complete,
                BareKey::Left | BareKey::Right => Event::SwitchDevice,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            }),
            InputMode::FilterPicker => Some(match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::KeyDown,
                BareKey::Up | BareKey::Char('k') => Event::KeyUp,
                BareKey::Char(' ') => Event::ToggleRow,
                BareKey::Char('c') => Event::ClearFilters,
                BareKey::Enter => Event::Submit,
                BareKey::Esc | BareKey::Char('q' | 'f') => Event::Escape,
                _ => return None,
            }),
            InputMode::ConfirmRemoval => Some(match key.bare_key {
                BareKey::Char('y') | BareKey::Enter => Event::ConfirmRemoval,
                BareKey::Char('n') | BareKey::Esc => Event::CancelRemoval,
                _ => return None,
            }),
            InputMode::Details => Some(match key.bare_key {
                BareKey::Esc | BareKey::Enter | BareKey::Char('q') => Event::Escape,
                _ => return None,
            }),
            InputMode::Search | InputMode::TagManager | InputMode::AddKeywords => None,
        }
    }

    fn map_normal_key(key: BareKey) -> Option<Event> {
        Some(match key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Char(' ') => Event::ToggleRow,
            BareKey::Char('a') => Event::ToggleAll,
            BareKey::Tab => Event::SwitchDevice,
            BareKey::Char('s') => Event::CycleSort,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::OpenFilterPicker,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('x') | BareKey::Delete => Event::Remove,
            BareKey::Char('*') => Event::ToggleFavorite,
            BareKey::Char('t') => Event::ManageTags,
            BareKey::Char('n') => Event::AddKeywords,
            BareKey::Enter => Event::ShowDetails,
            BareKey::Char('R') => Event::Reload,
            BareKey::Esc => Event::Escape,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Maps a finished command to an application event.
    ///
    /// Returns `None` for results belonging to another domain or to commands
    /// this plugin did not start.
    fn map_command_result_event(
        &self,
        exit_code: Option<i32>,
        stdout: &[u8],
        stderr: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        tracing::debug!(exit_code = ?exit_code, context = ?context, "run command result event");

        if context.get("domain") != Some(&self.app.domain) {
            tracing::debug!("dropping result for a previous domain");
            return None;
        }

        let success = exit_code == Some(0);
        let kind = context.get("kind")?;

        if kind == SOURCE_KIND {
            return Some(if success {
                Event::KeywordsLoaded {
                    payload: String::from_utf8_lossy(stdout).into_owned(),
                }
            } else {
                Event::SourceFailed {
                    error: failure_message(exit_code, stderr),
                }
            });
        }

        let kind = match kind.parse::<MutationKind>() {
            Ok(kind) => kind,
            Err(e) => {
                tracing::debug!(error = %e, "ignoring result with unknown kind");
                return None;
            }
        };
        let message = if success {
            String::from_utf8_lossy(stdout).trim().to_string()
        } else {
            failure_message(exit_code, stderr)
        };

        Some(Event::MutationFinished(MutationOutcome {
            kind,
            success,
            message,
        }))
    }

    /// Executes an action returned from event handling.
    ///
    /// Returns whether a follow-up event changed what should be rendered.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> bool {
        match action {
            Action::CloseFocus => {
                hide_self();
                false
            }
            Action::LoadKeywords { domain } => self.run_source(domain),
            Action::Mutate(request) => self.run_mutation(request),
        }
    }

    fn run_source(&mut self, domain: &str) -> bool {
        let Some(template) = self.commands.source.as_ref() else {
            return self.dispatch(&Event::SourceFailed {
                error: "source_command is not configured".to_string(),
            });
        };

        let argv = template.render(domain, None);
        tracing::debug!(program = %template.program(), "running keyword source");
        run_command(&as_args(&argv), command_context(SOURCE_KIND, domain));
        false
    }

    fn run_mutation(&mut self, request: &MutationRequest) -> bool {
        let kind = request.kind();
        let failure = |message: String| {
            Event::MutationFinished(MutationOutcome {
                kind,
                success: false,
                message,
            })
        };

        let payload = match request.to_payload() {
            Ok(payload) => payload,
            Err(e) => return self.dispatch(&failure(e.to_string())),
        };

        let Some(template) = self.commands.mutation(kind) else {
            let key = CommandSet::config_key(kind);
            return self.dispatch(&failure(format!("{key} is not configured")));
        };

        let argv = template.render(&self.app.domain, Some(&payload));
        tracing::debug!(
            kind = %kind,
            ids = ?request.ids(),
            program = %template.program(),
            "running mutation"
        );
        run_command(&as_args(&argv), command_context(kind.as_str(), &self.app.domain));
        false
    }
}

fn as_args(argv: &[String]) -> Vec<&str> {
    argv.iter().map(String::as_str).collect()
}

fn command_context(kind: &str, domain: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("kind".to_string(), kind.to_string()),
        ("domain".to_string(), domain.to_string()),
    ])
}

/// The command's stderr, or its exit status when stderr is empty.
fn failure_message(exit_code: Option<i32>, stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    if !stderr.is_empty() {
        return stderr;
    }
    exit_code.map_or_else(
        || "command terminated".to_string(),
        |code| format!("exited with status {code}"),
    )
}
