//! `${Name}` placeholder expansion
//!
//! Build configurations declare output names such as
//! `${BuildArtifactBaseFileName}.hex`. The planner keeps these verbatim;
//! callers expand them with [`expand_placeholders`] when they want concrete
//! paths.

use std::collections::HashMap;

/// Replace every `${Name}` token whose name is in `vars`.
///
/// Unknown tokens and unterminated `${` sequences are kept verbatim.
pub fn expand_placeholders(text: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match vars.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        log::debug!("Unresolved placeholder ${{{}}}", name);
                        out.push_str(&rest[start..start + 2 + end + 1]);
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);

    out
}
