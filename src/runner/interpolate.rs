//! Variable interpolation for command strings
//!
//! `${var}` is replaced by the context variable of that name, falling back to
//! the process environment. Unknown variables are left untouched so the shell
//! can still expand them. `$${var}` produces a literal `${var}`.

use crate::error::{InterpolationError, InterpolationResult};
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::sync::LazyLock;

static VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\$?)\{([^}]+)\}").expect("variable pattern is valid"));

/// Interpolate variables in a string
pub fn interpolate(s: &str, vars: &HashMap<String, String>) -> InterpolationResult<String> {
    expand(s, vars, &mut Vec::new())
}

fn expand(
    s: &str,
    vars: &HashMap<String, String>,
    active: &mut Vec<String>,
) -> InterpolationResult<String> {
    let mut out = String::with_capacity(s.len());
    let mut last = 0;

    for caps in VARIABLE.captures_iter(s) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&s[last..whole.start()]);
        last = whole.end();

        let name = &caps[2];
        if !caps[1].is_empty() {
            out.push_str("${");
            out.push_str(name);
            out.push('}');
            continue;
        }

        if active.iter().any(|n| n == name) {
            return Err(InterpolationError::RecursiveInterpolation);
        }

        match vars.get(name).cloned().or_else(|| env::var(name).ok()) {
            Some(value) => {
                active.push(name.to_string());
                let expanded = expand(&value, vars, active)?;
                active.pop();
                out.push_str(&expanded);
            }
            None => out.push_str(whole.as_str()),
        }
    }

    out.push_str(&s[last..]);
    Ok(out)
}

/// Like [`interpolate`], but unknown variables are an error
pub fn interpolate_strict(
    s: &str,
    vars: &HashMap<String, String>,
) -> InterpolationResult<String> {
    for caps in VARIABLE.captures_iter(s) {
        let name = &caps[2];
        if caps[1].is_empty() && !vars.contains_key(name) && env::var(name).is_err() {
            return Err(InterpolationError::UndefinedVariable(name.to_string()));
        }
    }
    interpolate(s, vars)
}
