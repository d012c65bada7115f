//! Entity Registry
//!
//! Owns the main entity and exposes the child operations driven by user
//! actions. Lookups by id fail with `EmberError::NotFound`; capability
//! assignment keeps the boolean no-op semantics of the entity itself.

use crate::domain::{ChildEntity, ChildId, CommandHistory, EmberError, MainEntity, Position};
use crate::ports::ChildSnapshot;

#[derive(Debug, Clone)]
pub struct EntityRegistry {
    main: MainEntity,
}

impl EntityRegistry {
    pub fn new(origin: Position, history: CommandHistory) -> Self {
        Self {
            main: MainEntity::new(origin, history),
        }
    }

    pub fn main(&self) -> &MainEntity {
        &self.main
    }

    pub fn main_mut(&mut self) -> &mut MainEntity {
        &mut self.main
    }

    /// Split the main entity, returning the new child's id
    pub fn split(&mut self) -> ChildId {
        self.main.split()
    }

    pub fn children(&self) -> &[ChildEntity] {
        self.main.children()
    }

    pub fn child(&self, id: ChildId) -> Result<&ChildEntity, EmberError> {
        self.main
            .child(id)
            .ok_or_else(|| EmberError::not_found("child", id))
    }

    pub fn child_mut(&mut self, id: ChildId) -> Result<&mut ChildEntity, EmberError> {
        self.main
            .child_mut(id)
            .ok_or_else(|| EmberError::not_found("child", id))
    }

    /// First child whose name matches, ignoring case
    pub fn find_child_by_name(&self, name: &str) -> Option<ChildId> {
        let name = name.to_lowercase();
        self.main
            .iter_children()
            .find(|(_, child)| child.name.to_lowercase() == name)
            .map(|(id, _)| id)
    }

    pub fn rename_child(&mut self, id: ChildId, name: impl Into<String>) -> Result<(), EmberError> {
        self.child_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn describe_child(
        &mut self,
        id: ChildId,
        description: impl Into<String>,
    ) -> Result<(), EmberError> {
        self.child_mut(id)?.description = description.into();
        Ok(())
    }

    pub fn assign_function(&mut self, id: ChildId, function_name: &str) -> Result<bool, EmberError> {
        Ok(self.child_mut(id)?.assign_function(function_name))
    }

    pub fn remove_function(&mut self, id: ChildId, function_name: &str) -> Result<bool, EmberError> {
        Ok(self.child_mut(id)?.remove_function(function_name))
    }

    /// Roster as sent to the interpreter
    pub fn snapshot(&self) -> Vec<ChildSnapshot> {
        self.main
            .children()
            .iter()
            .map(|child| ChildSnapshot {
                name: child.name.clone(),
                functions: child.assigned_functions().to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with_child() -> (EntityRegistry, ChildId) {
        let mut registry = EntityRegistry::new(Position::default(), CommandHistory::default());
        let id = registry.split();
        registry
            .child_mut(id)
            .unwrap()
            .set_available_functions(vec!["weather".to_string(), "news".to_string()]);
        (registry, id)
    }

    #[test]
    fn test_unknown_child_is_not_found() {
        let (mut registry, _) = registry_with_child();
        let err = registry.rename_child(ChildId(5), "ghost").unwrap_err();
        assert!(matches!(err, EmberError::NotFound { .. }));
    }

    #[test]
    fn test_snapshot_uses_assigned_functions() {
        let (mut registry, id) = registry_with_child();
        registry.rename_child(id, "Forecaster").unwrap();
        assert!(registry.assign_function(id, "weather").unwrap());
        assert!(!registry.assign_function(id, "sports").unwrap());

        assert_eq!(
            registry.snapshot(),
            vec![ChildSnapshot {
                name: "Forecaster".to_string(),
                functions: vec!["weather".to_string()],
            }]
        );
    }

    #[test]
    fn test_find_child_by_name_ignores_case() {
        let (mut registry, id) = registry_with_child();
        registry.rename_child(id, "Forecaster").unwrap();
        assert_eq!(registry.find_child_by_name("forecaster"), Some(id));
        assert_eq!(registry.find_child_by_name("reader"), None);

        registry.rename_child(id, "Ämber").unwrap();
        assert_eq!(registry.find_child_by_name("ämber"), Some(id));
    }
}
