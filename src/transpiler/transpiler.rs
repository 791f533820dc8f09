//! Main transpiler module.
//!
//! Renders a [`CompilationUnit`] into one C translation unit. The AST is
//! assumed valid: names and types were checked by the transformer, so the
//! only failure left is a symbol missing the information emission needs.

use log::debug;

use crate::{
    errors::errors::Error,
    semantic::{
        symbol::{SymbolId, SymbolTable},
        transformer::CompilationUnit,
    },
};

use super::{prelude::prelude, stmt::gen_statement};

/// Settings for one transpilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranspileOptions {
    /// Emit `#include`s and builtin typedefs before the code.
    pub emit_prelude: bool,
}

/// Emission state.
///
/// The transpiler keeps its own stack of the modules opened so far, used only
/// to spell the names of function definitions.
pub struct Transpiler<'a> {
    pub symbols: &'a SymbolTable,
    pub modules: Vec<String>,
}

impl<'a> Transpiler<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Transpiler {
            symbols,
            modules: vec![],
        }
    }

    /// `<module>_<name>` inside a module, `name` outside of one.
    pub fn mangled(&self, name: &str) -> String {
        if self.modules.is_empty() {
            return name.to_string();
        }

        format!("{}_{}", self.modules.join("_"), name)
    }

    /// Mangles a function symbol by the modules it is nested in.
    pub fn mangled_symbol(&self, id: SymbolId) -> String {
        let mut parts = vec![self.symbols.get(id).get_name()];
        let mut module = self.symbols.enclosing_module(id);

        while let Some(id) = module {
            parts.push(self.symbols.get(id).get_name());
            module = self.symbols.enclosing_module(id);
        }

        parts.reverse();
        parts.join("_")
    }
}

pub fn transpile(unit: &CompilationUnit, options: &TranspileOptions) -> Result<String, Error> {
    let mut transpiler = Transpiler::new(&unit.symbols);
    let mut output = String::new();

    if options.emit_prelude {
        output.push_str(&prelude());
    }

    for statement in &unit.source_file.stmts {
        debug!("emitting statement at {}", statement.get_span().start);
        output.push_str(&gen_statement(&mut transpiler, statement)?);
    }

    Ok(output)
}
