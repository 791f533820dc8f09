use crate::semantic::{
    symbol::SymbolTable,
    typing::{Qualifier, Typing},
};

/// Renders a C declarator for `name` of type `typing`.
///
/// Qualifiers are applied outermost first: pointers and slices prefix a `*`,
/// arrays append `[n]` and group a pending pointer in parentheses. The stars
/// left at the front are then moved onto the base type, giving `u8* bytes`
/// rather than `u8 *bytes`. An empty `name` renders an abstract declarator
/// such as `u8*` for use in parameter lists and return positions.
pub fn declarator(symbols: &SymbolTable, typing: &Typing, name: &str) -> String {
    match typing {
        Typing::Ref { symbol, qualifiers } => {
            let mut declared = name.to_string();

            for qualifier in qualifiers {
                declared = match qualifier {
                    Qualifier::Pointer | Qualifier::Slice => format!("*{}", declared),
                    Qualifier::Array(size) if declared.starts_with('*') => {
                        format!("({})[{}]", declared, size)
                    }
                    Qualifier::Array(size) => format!("{}[{}]", declared, size),
                };
            }

            let rest = declared.trim_start_matches('*');
            let stars = &declared[..declared.len() - rest.len()];
            let base = symbols.get(*symbol).get_name();

            format!("{}{} {}", base, stars, rest).trim_end().to_string()
        }
        Typing::Signature {
            params,
            returns,
            variadic,
        } => {
            let mut param_types: Vec<String> = params
                .iter()
                .map(|param| declarator(symbols, param, ""))
                .collect();
            if *variadic {
                param_types.push(String::from("..."));
            }

            let pointer = format!("(*{})({})", name, param_types.join(","));
            declarator(symbols, returns, &pointer)
        }
    }
}

/// Renders a function head `returns name(params)`. The name and parameter
/// list sit inside the return type's declarator so pointer returns stay
/// attached to the function.
pub fn function_head(symbols: &SymbolTable, returns: &Typing, name: &str, params: &[String]) -> String {
    declarator(symbols, returns, &format!("{}({})", name, params.join(",")))
}
