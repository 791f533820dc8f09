//! Optional header placed before the translation unit.
//!
//! Maps every builtin type onto its C counterpart so the emitted code can be
//! compiled on its own. `bool` comes straight from `<stdbool.h>`.

use crate::semantic::symbol::BUILTIN_TYPES;

const INCLUDES: [&str; 3] = ["stdbool.h", "stddef.h", "stdint.h"];

/// The C type a builtin is defined as, or `None` when the name is already
/// provided by a system header.
pub fn c_type(builtin: &str) -> Option<&'static str> {
    match builtin {
        "i8" => Some("int8_t"),
        "u8" => Some("uint8_t"),
        "i16" => Some("int16_t"),
        "u16" => Some("uint16_t"),
        "i32" => Some("int32_t"),
        "u32" => Some("uint32_t"),
        "i64" => Some("int64_t"),
        "u64" => Some("uint64_t"),
        "f32" => Some("float"),
        "f64" => Some("double"),
        "string" => Some("char*"),
        _ => None,
    }
}

pub fn prelude() -> String {
    let mut prelude = String::new();

    for header in INCLUDES {
        prelude.push_str(&format!("#include <{}>\n", header));
    }

    for builtin in BUILTIN_TYPES {
        if let Some(c_type) = c_type(builtin) {
            prelude.push_str(&format!("typedef {} {};\n", c_type, builtin));
        }
    }

    prelude
}
