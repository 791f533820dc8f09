//! Symbols and the scope tree.
//!
//! Every compilation unit owns a [`SymbolTable`]: an arena of [`Symbol`]s
//! addressed by [`SymbolId`] handles, rooted at a `global` symbol. Parents are
//! stored as handles, so the tree has no shared ownership. The predefined
//! builtin types live in a separate, process-wide table that is read-only
//! after initialization and is shared by every unit.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::errors::errors::ErrorImpl;

use super::typing::Typing;

/// Names of the predefined types, in declaration order.
pub const BUILTIN_TYPES: [&str; 12] = [
    "bool", "i8", "u8", "i16", "u16", "i32", "u32", "i64", "u64", "f32", "f64", "string",
];

pub const ROOT_NAME: &str = "global";

lazy_static! {
    static ref BUILTINS: Vec<Symbol> = BUILTIN_TYPES
        .iter()
        .map(|name| Symbol::new(name, SymbolKind::Type, None))
        .collect();
    static ref BUILTIN_LOOKUP: HashMap<&'static str, usize> = BUILTIN_TYPES
        .iter()
        .enumerate()
        .map(|(index, name)| (*name, index))
        .collect();
}

/// Handle to a symbol: either a process-wide builtin or an entry in one
/// unit's table. Equal handles mean the same symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    Builtin(usize),
    Unit(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Type,
    Func,
    Module,
    Global,
    CodeBlock,
    Param,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    /// Absent for plain type names and for scopes.
    typing: Option<Typing>,
    parent: Option<SymbolId>,
    children: HashMap<String, SymbolId>,
    /// Declared by `external`; never mangled on emission.
    external: bool,
}

impl Symbol {
    fn new(name: &str, kind: SymbolKind, parent: Option<SymbolId>) -> Self {
        Symbol {
            name: name.to_string(),
            kind,
            typing: None,
            parent,
            children: HashMap::new(),
            external: false,
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn get_typing(&self) -> Option<&Typing> {
        self.typing.as_ref()
    }

    pub fn get_parent(&self) -> Option<SymbolId> {
        self.parent
    }

    pub fn get_child(&self, name: &str) -> Option<SymbolId> {
        self.children.get(name).copied()
    }

    pub fn is_external(&self) -> bool {
        self.external
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: vec![Symbol::new(ROOT_NAME, SymbolKind::Global, None)],
        }
    }

    pub fn root(&self) -> SymbolId {
        SymbolId::Unit(0)
    }

    pub fn builtin(name: &str) -> Option<SymbolId> {
        BUILTIN_LOOKUP.get(name).map(|index| SymbolId::Builtin(*index))
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        match id {
            SymbolId::Builtin(index) => &BUILTINS[index],
            SymbolId::Unit(index) => &self.symbols[index],
        }
    }

    fn get_unit_mut(&mut self, id: SymbolId) -> Result<&mut Symbol, ErrorImpl> {
        match id {
            SymbolId::Unit(index) => self.symbols.get_mut(index).ok_or_else(|| {
                ErrorImpl::MalformedTree {
                    message: format!("no symbol with handle {}", index),
                }
            }),
            SymbolId::Builtin(index) => Err(ErrorImpl::MalformedTree {
                message: format!("builtin `{}` is read-only", BUILTINS[index].name),
            }),
        }
    }

    /// Allocates a symbol whose parent link points at `parent`. The symbol is
    /// not yet visible through `parent`'s children; see [`Self::add_child`].
    pub fn create(&mut self, name: &str, kind: SymbolKind, parent: SymbolId) -> SymbolId {
        self.symbols.push(Symbol::new(name, kind, Some(parent)));
        SymbolId::Unit(self.symbols.len() - 1)
    }

    pub fn set_typing(&mut self, id: SymbolId, typing: Typing) -> Result<(), ErrorImpl> {
        self.get_unit_mut(id)?.typing = Some(typing);
        Ok(())
    }

    pub fn mark_external(&mut self, id: SymbolId) -> Result<(), ErrorImpl> {
        self.get_unit_mut(id)?.external = true;
        Ok(())
    }

    /// Publishes `child` under its name in `parent`'s scope.
    pub fn add_child(&mut self, parent: SymbolId, child: SymbolId) -> Result<(), ErrorImpl> {
        let name = self.get(child).name.clone();
        let scope = self.get_unit_mut(parent)?;

        if scope.children.contains_key(&name) {
            return Err(ErrorImpl::Redefinition { name });
        }

        scope.children.insert(name, child);
        Ok(())
    }

    /// Searches `scope`'s children, then each ancestor's, then the builtins.
    /// User declarations therefore shadow builtin types.
    pub fn resolve_name(&self, scope: SymbolId, name: &str) -> Result<SymbolId, ErrorImpl> {
        let mut current = Some(scope);

        while let Some(id) = current {
            let symbol = self.get(id);
            if let Some(found) = symbol.get_child(name) {
                return Ok(found);
            }
            current = symbol.parent;
        }

        SymbolTable::builtin(name).ok_or_else(|| ErrorImpl::UnresolvedSymbol {
            name: name.to_string(),
        })
    }

    /// Resolves a possibly dotted name. A single segment is looked up like
    /// [`Self::resolve_name`]; a longer path restarts at the root and then
    /// only descends into direct children of each scope reached.
    pub fn resolve_full_name(&self, scope: SymbolId, name: &str) -> Result<SymbolId, ErrorImpl> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() == 1 {
            return self.resolve_name(scope, name);
        }

        let root = self.root_of(scope);
        let mut current = self.resolve_name(root, parts[0]).map_err(|_| unresolved(name))?;

        for part in &parts[1..] {
            current = self.get(current).get_child(part).ok_or_else(|| unresolved(name))?;
        }

        Ok(current)
    }

    pub fn root_of(&self, id: SymbolId) -> SymbolId {
        let mut current = id;
        while let Some(parent) = self.get(current).parent {
            current = parent;
        }
        current
    }

    /// Dot-joined names from the root down to `id` (`global.fib.fib`).
    pub fn full_name(&self, id: SymbolId) -> String {
        let mut names = vec![];
        let mut current = Some(id);

        while let Some(id) = current {
            let symbol = self.get(id);
            names.push(symbol.name.as_str());
            current = symbol.parent;
        }

        names.reverse();
        names.join(".")
    }

    /// The closest enclosing module of `id`, if any.
    pub fn enclosing_module(&self, id: SymbolId) -> Option<SymbolId> {
        let mut current = self.get(id).parent;

        while let Some(id) = current {
            let symbol = self.get(id);
            if symbol.kind == SymbolKind::Module {
                return Some(id);
            }
            current = symbol.parent;
        }

        None
    }
}

fn unresolved(name: &str) -> ErrorImpl {
    ErrorImpl::UnresolvedSymbol {
        name: name.to_string(),
    }
}
