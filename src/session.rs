use crate::command::generate;
use crate::history::CommandHistory;
use crate::paths::{PathResolver, Separator};
use crate::prefs::{Prefs, PrefsError};
use crate::tools::{ToolConfig, ToolId};
use std::collections::HashMap;

/// Everything the front-end mutates: selected tool, one config per tool,
/// the base path and the copy history. Owned by whoever drives the UI.
#[derive(Debug)]
pub struct Session {
    active: ToolId,
    configs: HashMap<ToolId, ToolConfig>,
    base_path: String,
    separator: Separator,
    history: CommandHistory,
    prefs: Prefs,
}

impl Session {
    /// Start from the saved base path and separator in `prefs`.
    pub fn new(prefs: Prefs) -> Self {
        let configs = ToolId::ALL
            .into_iter()
            .map(|tool| (tool, ToolConfig::default_for(tool)))
            .collect();
        Self {
            active: ToolId::Trim,
            configs,
            base_path: prefs.base_path().to_string(),
            separator: prefs.separator(),
            history: CommandHistory::new(),
            prefs,
        }
    }

    pub fn active(&self) -> ToolId {
        self.active
    }

    pub fn select(&mut self, tool: ToolId) {
        tracing::debug!(%tool, "tool selected");
        self.active = tool;
    }

    pub fn config(&self) -> &ToolConfig {
        self.config_for(self.active)
    }

    pub fn config_for(&self, tool: ToolId) -> &ToolConfig {
        &self.configs[&tool]
    }

    pub fn config_mut(&mut self) -> &mut ToolConfig {
        let active = self.active;
        self.configs
            .entry(active)
            .or_insert_with(|| ToolConfig::default_for(active))
    }

    /// Replace the config for its own tool and make that tool active.
    pub fn apply(&mut self, config: ToolConfig) {
        self.active = config.tool();
        self.configs.insert(config.tool(), config);
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Use `base` for this run only.
    pub fn override_base_path(&mut self, base: &str) {
        self.base_path = base.trim().to_string();
    }

    /// Change the base path and persist it.
    pub fn set_base_path(&mut self, base: &str) -> Result<(), PrefsError> {
        self.override_base_path(base);
        self.prefs.set_base_path(&self.base_path)
    }

    pub fn separator(&self) -> Separator {
        self.separator
    }

    pub fn override_separator(&mut self, separator: Separator) {
        self.separator = separator;
    }

    pub fn set_separator(&mut self, separator: Separator) -> Result<(), PrefsError> {
        self.separator = separator;
        self.prefs.set_separator(separator)
    }

    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.base_path.clone(), self.separator)
    }

    /// The command for the active tool, recomputed from current state.
    pub fn command(&self) -> String {
        generate(self.config(), &self.resolver())
    }

    /// Record the active command as copied. Returns the command text.
    pub fn record_copy(&mut self) -> String {
        let command = self.command();
        if self.history.record(self.active, &command) {
            tracing::debug!(tool = %self.active, entries = self.history.len(), "history updated");
        }
        command
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    pub fn prefs_mut(&mut self) -> &mut Prefs {
        &mut self.prefs
    }
}
