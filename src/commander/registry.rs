use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};

use super::command::CommandDef;

#[derive(Default)]
struct Entries {
    commands: HashMap<String, Arc<CommandDef>>,
    default: Option<Arc<CommandDef>>,
}

/// Registry mapping command names to their definitions.
///
/// Names are case sensitive. Lookups hand out `Arc`s and release the lock before any
/// handler runs.
#[derive(Default)]
pub struct CommandRegistry {
    entries: RwLock<Entries>,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub enum Resolved {
    Command(Arc<CommandDef>),
    Default(Arc<CommandDef>),
}

impl Resolved {
    pub fn definition(&self) -> &Arc<CommandDef> {
        match self {
            Resolved::Command(def) | Resolved::Default(def) => def,
        }
    }

    pub fn into_definition(self) -> Arc<CommandDef> {
        match self {
            Resolved::Command(def) | Resolved::Default(def) => def,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Resolved::Default(_))
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `def` under `name`, replacing any previous definition.
    pub fn register(&self, name: impl Into<String>, def: CommandDef) {
        let name = name.into();
        info!("Registering command {name} ({def:?})");
        self.write().commands.insert(name, Arc::new(def));
    }

    /// Sets the definition used when no registered name matches.
    pub fn register_default(&self, def: CommandDef) {
        info!("Registering default command ({def:?})");
        self.write().default = Some(Arc::new(def));
    }

    /// Removes all commands, including the default one.
    pub fn clear(&self) {
        let mut entries = self.write();
        debug!("Clearing {} commands", entries.commands.len());
        entries.commands.clear();
        entries.default = None;
    }

    /// Exact match, without falling back to the default.
    pub fn get(&self, name: &str) -> Option<Arc<CommandDef>> {
        self.read().commands.get(name).cloned()
    }

    /// Exact match, or the default definition when there is one.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        let entries = self.read();
        match entries.commands.get(name) {
            Some(def) => Some(Resolved::Command(Arc::clone(def))),
            None => entries.default.clone().map(Resolved::Default),
        }
    }

    pub fn has_default(&self) -> bool {
        self.read().default.is_some()
    }

    /// Registered command names, sorted.
    pub fn command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered names, the default command not included.
    pub fn len(&self) -> usize {
        self.read().commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().commands.is_empty()
    }

    // Entries are replaced as a whole under the lock, so a poisoned lock still guards
    // consistent data.
    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
