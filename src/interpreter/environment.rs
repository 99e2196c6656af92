//! Variable storage for the interpreter.
//!
//! Scopes live in an arena and point at their parent by index, so a lookup
//! walks outward without shared ownership between scopes.

use std::collections::HashMap;

use crate::{ast::types::Type, errors::errors::ErrorImpl};

use super::value::Value;

pub type ScopeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Value,
    /// Annotation from the declaration, used to widen later assignments
    pub declared_type: Type,
    pub mutable: bool,
}

#[derive(Debug, Default)]
pub struct Scope {
    parent: Option<ScopeId>,
    bindings: HashMap<String, Binding>,
}

#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeId,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
            current: 0,
        }
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut scope = self.scopes[self.current].parent;
        while let Some(id) = scope {
            depth += 1;
            scope = self.scopes[id].parent;
        }
        depth
    }

    /// Opens a child of the current scope and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        self.scopes.push(Scope {
            parent: Some(self.current),
            bindings: HashMap::new(),
        });
        self.current = self.scopes.len() - 1;
        self.current
    }

    /// Drops the current scope and returns to its parent. The root scope is
    /// never dropped.
    pub fn exit_scope(&mut self) {
        let Some(parent) = self.scopes[self.current].parent else {
            return;
        };

        if self.current == self.scopes.len() - 1 {
            self.scopes.pop();
        }
        self.current = parent;
    }

    /// Binds `name` in the current scope, shadowing any outer binding.
    pub fn define(&mut self, name: &str, value: Value, declared_type: Type, mutable: bool) {
        self.scopes[self.current].bindings.insert(
            name.to_string(),
            Binding {
                value,
                declared_type,
                mutable,
            },
        );
    }

    fn resolve(&self, name: &str) -> Option<ScopeId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            if self.scopes[id].bindings.contains_key(name) {
                return Some(id);
            }
            scope = self.scopes[id].parent;
        }
        None
    }

    pub fn get_binding(&self, name: &str) -> Option<&Binding> {
        self.resolve(name)
            .and_then(|id| self.scopes[id].bindings.get(name))
    }

    pub fn get(&self, name: &str) -> Result<Value, ErrorImpl> {
        self.get_binding(name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| ErrorImpl::UndefinedVariable {
                variable: name.to_string(),
            })
    }

    /// Rebinds the innermost `name`.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), ErrorImpl> {
        let Some(id) = self.resolve(name) else {
            return Err(ErrorImpl::UndefinedVariable {
                variable: name.to_string(),
            });
        };

        match self.scopes[id].bindings.get_mut(name) {
            Some(binding) if !binding.mutable => Err(ErrorImpl::ImmutableAssignment {
                variable: name.to_string(),
            }),
            Some(binding) => {
                binding.value = value;
                Ok(())
            }
            None => Err(ErrorImpl::UndefinedVariable {
                variable: name.to_string(),
            }),
        }
    }
}
