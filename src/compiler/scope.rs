//! Lexical scopes for the emitter.
//!
//! Environments live in an arena and point at their parent by index, so a
//! scope that has been left stays allocated but is no longer on the lookup
//! chain of whatever is emitted next.

use std::collections::HashMap;

use crate::ast::types::StaticType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Constant,
    Parameter,
    /// `static_type` holds the return type.
    Function,
    Builtin,
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub static_type: StaticType,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn new(name: &str, static_type: StaticType, kind: SymbolKind) -> Self {
        Symbol {
            name: String::from(name),
            static_type,
            kind,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.kind == SymbolKind::Constant
    }
}

#[derive(Debug, Default)]
pub struct Environment {
    pub symbols: HashMap<String, Symbol>,
    pub parent: Option<usize>,
}

impl Environment {
    pub fn new(parent: Option<usize>) -> Self {
        Environment {
            symbols: HashMap::new(),
            parent,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }
}

#[derive(Debug)]
pub struct Scopes {
    environments: Vec<Environment>,
    current: usize,
}

impl Default for Scopes {
    fn default() -> Self {
        Scopes::new()
    }
}

impl Scopes {
    /// Starts with the global environment only.
    pub fn new() -> Self {
        Scopes {
            environments: vec![Environment::new(None)],
            current: 0,
        }
    }

    pub const GLOBAL: usize = 0;

    /// Enters a child of the current environment and returns its index.
    pub fn push(&mut self) -> usize {
        let id = self.environments.len();
        self.environments.push(Environment::new(Some(self.current)));
        self.current = id;
        id
    }

    /// Returns to the parent environment. The global one is never left.
    pub fn pop(&mut self) {
        if let Some(parent) = self.environments[self.current].parent {
            self.current = parent;
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of environments on the chain from the current one to the global one.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Binds in the current environment; a later binding of the same name replaces it.
    pub fn define(&mut self, symbol: Symbol) {
        self.environments[self.current]
            .symbols
            .insert(symbol.name.clone(), symbol);
    }

    pub fn define_global(&mut self, symbol: Symbol) {
        self.environments[Scopes::GLOBAL]
            .symbols
            .insert(symbol.name.clone(), symbol);
    }

    /// Innermost binding of `name` visible from the current environment.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.chain().find_map(|environment| environment.get(name))
    }

    fn chain(&self) -> impl Iterator<Item = &Environment> + '_ {
        std::iter::successors(Some(&self.environments[self.current]), |environment| {
            environment.parent.map(|parent| &self.environments[parent])
        })
    }
}
