//! Main and child entities
//!
//! The registry is a two-level tree: one main entity owning an ordered
//! roster of children. Children cannot own children, so the tree never
//! grows deeper than that.

use serde::{Deserialize, Serialize};

use super::CommandHistory;
use crate::domain::value_objects::Position;

/// Name given to a freshly split child
pub const DEFAULT_CHILD_NAME: &str = "New Child Entity";

/// Offset from the main entity at which a new child appears
const SPLIT_OFFSET: (f32, f32) = (0.5, -0.5);

/// Positional handle of a child inside the main entity's roster.
///
/// Children are never removed during a session, so an id stays valid for
/// as long as the registry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId(pub usize);

impl ChildId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// A spawned entity with capability labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildEntity {
    pub position: Position,
    pub name: String,
    pub description: String,
    available_functions: Vec<String>,
    assigned_functions: Vec<String>,
}

impl ChildEntity {
    /// Create a child with the default name and no capabilities
    pub fn new(position: Position) -> Self {
        Self {
            position,
            name: DEFAULT_CHILD_NAME.to_string(),
            description: String::new(),
            available_functions: Vec::new(),
            assigned_functions: Vec::new(),
        }
    }

    pub fn is_main_entity(&self) -> bool {
        false
    }

    /// Labels this child may be assigned
    pub fn available_functions(&self) -> &[String] {
        &self.available_functions
    }

    /// Labels currently active, in assignment order
    pub fn assigned_functions(&self) -> &[String] {
        &self.assigned_functions
    }

    /// Replace the permitted labels.
    ///
    /// Already assigned labels are kept even if they are no longer
    /// available.
    pub fn set_available_functions(&mut self, functions: Vec<String>) {
        self.available_functions = functions;
    }

    /// Assign a label. Returns `false` when it is not available or already
    /// assigned.
    pub fn assign_function(&mut self, function_name: &str) -> bool {
        if !self.available_functions.iter().any(|f| f == function_name)
            || self.assigned_functions.iter().any(|f| f == function_name)
        {
            return false;
        }
        self.assigned_functions.push(function_name.to_string());
        tracing::debug!("Assigned function {} to entity {}", function_name, self.name);
        true
    }

    /// Unassign a label. Returns `false` when it was not assigned.
    pub fn remove_function(&mut self, function_name: &str) -> bool {
        match self.assigned_functions.iter().position(|f| f == function_name) {
            Some(index) => {
                self.assigned_functions.remove(index);
                tracing::debug!("Removed function {} from entity {}", function_name, self.name);
                true
            }
            None => false,
        }
    }

    /// Name for display, falling back to `Child N` when blank
    pub fn display_name(&self, id: ChildId) -> String {
        if self.name.trim().is_empty() {
            format!("Child {}", id.index() + 1)
        } else {
            self.name.clone()
        }
    }
}

/// The single root entity of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MainEntity {
    pub position: Position,
    pub name: String,
    pub description: String,
    children: Vec<ChildEntity>,
    history: CommandHistory,
}

impl MainEntity {
    pub fn new(position: Position, history: CommandHistory) -> Self {
        Self {
            position,
            name: String::new(),
            description: String::new(),
            children: Vec::new(),
            history,
        }
    }

    pub fn is_main_entity(&self) -> bool {
        true
    }

    /// Spawn a child next to this entity and append it to the roster
    pub fn split(&mut self) -> ChildId {
        let (dx, dy) = SPLIT_OFFSET;
        let child = ChildEntity::new(self.position.offset(dx, dy, 0.0));
        self.children.push(child);
        ChildId(self.children.len() - 1)
    }

    pub fn children(&self) -> &[ChildEntity] {
        &self.children
    }

    pub fn child(&self, id: ChildId) -> Option<&ChildEntity> {
        self.children.get(id.index())
    }

    pub fn child_mut(&mut self, id: ChildId) -> Option<&mut ChildEntity> {
        self.children.get_mut(id.index())
    }

    /// Roster entries paired with their ids
    pub fn iter_children(&self) -> impl Iterator<Item = (ChildId, &ChildEntity)> {
        self.children
            .iter()
            .enumerate()
            .map(|(index, child)| (ChildId(index), child))
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut CommandHistory {
        &mut self.history
    }
}
