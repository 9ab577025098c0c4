// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command lookup by name

use crate::{Command, ExecCommand, SaveCommand, StatusCommand, SyncCommand};
use indexmap::IndexMap;
use std::sync::Arc;

/// Commands known to both the orchestrator and its workers.
///
/// Workers look commands up by the name carried in each task, so both sides
/// must build the same registry.
#[derive(Clone, Default)]
pub struct Registry {
    commands: IndexMap<&'static str, Arc<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands shipped with the tool.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(SyncCommand));
        registry.register(Arc::new(ExecCommand));
        registry.register(Arc::new(StatusCommand));
        registry.register(Arc::new(SaveCommand));
        registry
    }

    /// Add a command, replacing any previous one with the same name.
    pub fn register(&mut self, command: Arc<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.commands.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
