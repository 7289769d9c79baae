// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role-to-menu mapping.
//!
//! [`RoleMenuMap`] is the single source of truth for "what can role R see".
//! Each role owns an ordered list of [`RoleMenuEntry`] values. Order matters:
//! the first entry that is not the dashboard root is where the role lands
//! after login.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::error::MenuError;

// =============================================================================
// RoleMenuEntry
// =============================================================================

/// One navigation entry, with at most one level of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMenuEntry {
    /// Route path.
    pub path: String,
    /// Display label.
    pub label: String,
    /// Nested entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RoleMenuEntry>,
}

impl RoleMenuEntry {
    /// Creates a leaf entry.
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Sets the children.
    pub fn with_children(mut self, children: Vec<RoleMenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// Returns the first child, if any.
    pub fn first_child(&self) -> Option<&RoleMenuEntry> {
        self.children.first()
    }
}

// =============================================================================
// Canonical table
// =============================================================================

static CANONICAL: Lazy<RoleMenuMap> = Lazy::new(|| RoleMenuMap {
    entries: Arc::new(canonical_entries()),
});

fn canonical_entries() -> HashMap<Role, Vec<RoleMenuEntry>> {
    let mut entries = HashMap::new();

    entries.insert(
        Role::Administrador,
        vec![
            RoleMenuEntry::new("/dashboard", "Inicio"),
            RoleMenuEntry::new("/dashboard/pruebas", "Pruebas").with_children(vec![
                RoleMenuEntry::new("/dashboard/pruebas/baremos", "Baremos"),
                RoleMenuEntry::new("/dashboard/pruebas/disciplinas", "Disciplinas"),
            ]),
            RoleMenuEntry::new("/dashboard/atletas", "Atletas"),
            RoleMenuEntry::new("/dashboard/competencias", "Competencias"),
            RoleMenuEntry::new("/dashboard/entrenamientos", "Entrenamientos"),
            RoleMenuEntry::new("/dashboard/roles", "Roles"),
        ],
    );

    entries.insert(
        Role::Entrenador,
        vec![
            RoleMenuEntry::new("/dashboard", "Inicio"),
            RoleMenuEntry::new("/dashboard/atletas", "Mis atletas"),
            RoleMenuEntry::new("/dashboard/entrenamientos", "Entrenamientos"),
            RoleMenuEntry::new("/dashboard/competencias", "Competencias"),
        ],
    );

    entries.insert(
        Role::Atleta,
        vec![RoleMenuEntry::new("/dashboard", "Inicio")],
    );

    entries
}

// =============================================================================
// RoleMenuMap
// =============================================================================

/// Read-only mapping from role to its ordered menu entries.
///
/// Cheap to clone; the table is shared.
#[derive(Debug, Clone)]
pub struct RoleMenuMap {
    entries: Arc<HashMap<Role, Vec<RoleMenuEntry>>>,
}

impl RoleMenuMap {
    /// Returns the built-in table.
    pub fn canonical() -> Self {
        CANONICAL.clone()
    }

    /// Creates a builder for a custom table.
    pub fn builder() -> RoleMenuMapBuilder {
        RoleMenuMapBuilder::new()
    }

    /// Returns the entries for `role`; empty for `None` or an unmapped role.
    pub fn entries_for(&self, role: Option<Role>) -> &[RoleMenuEntry] {
        role.and_then(|r| self.entries.get(&r))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the roles that have a table.
    pub fn roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.entries.keys().copied().collect();
        roles.sort();
        roles
    }

    /// Returns `true` if `role` has a table.
    pub fn contains(&self, role: Role) -> bool {
        self.entries.contains_key(&role)
    }
}

impl Default for RoleMenuMap {
    fn default() -> Self {
        Self::canonical()
    }
}

// =============================================================================
// RoleMenuMapBuilder
// =============================================================================

/// Builder for validated role menu tables.
#[derive(Debug, Default)]
pub struct RoleMenuMapBuilder {
    entries: HashMap<Role, Vec<RoleMenuEntry>>,
    unknown: Vec<String>,
}

impl RoleMenuMapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entries for a role, replacing any previous ones.
    pub fn role(mut self, role: Role, entries: Vec<RoleMenuEntry>) -> Self {
        self.entries.insert(role, entries);
        self
    }

    /// Sets the entries for a role given by wire name.
    ///
    /// An unrecognized name fails [`build`](Self::build).
    pub fn named_role(mut self, name: &str, entries: Vec<RoleMenuEntry>) -> Self {
        match Role::parse(name) {
            Some(role) => {
                self.entries.insert(role, entries);
            }
            None => self.unknown.push(name.to_string()),
        }
        self
    }

    /// Validates and builds the table.
    pub fn build(self) -> Result<RoleMenuMap, MenuError> {
        if let Some(role) = self.unknown.into_iter().next() {
            return Err(MenuError::UnknownRole { role });
        }

        for (role, entries) in &self.entries {
            validate_entries(*role, entries)?;
        }

        Ok(RoleMenuMap {
            entries: Arc::new(self.entries),
        })
    }
}

fn validate_entries(role: Role, entries: &[RoleMenuEntry]) -> Result<(), MenuError> {
    let mut seen = HashSet::new();

    let mut check = |entry: &RoleMenuEntry| {
        if entry.path.trim().is_empty() {
            return Err(MenuError::EmptyPath {
                role: role.to_string(),
            });
        }
        if !seen.insert(entry.path.clone()) {
            return Err(MenuError::DuplicatePath {
                role: role.to_string(),
                path: entry.path.clone(),
            });
        }
        Ok(())
    };

    for entry in entries {
        check(entry)?;
        for child in &entry.children {
            if !child.children.is_empty() {
                return Err(MenuError::NestingTooDeep {
                    role: role.to_string(),
                    path: child.path.clone(),
                });
            }
            check(child)?;
        }
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
