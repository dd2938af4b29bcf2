use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Substitute `${VAR}` and `${VAR:-default}` placeholders from the environment
///
/// Runs on the raw TOML text before parsing. Comment lines are left alone so
/// that commented-out settings never require their variables. `$${` escapes a
/// literal `${`.
pub fn expand_env(input: &str) -> Result<String, String> {
    fn placeholder() -> &'static Regex {
        static RE: OnceLock<Regex> = OnceLock::new();
        RE.get_or_init(|| {
            Regex::new(r"\$(\$)?\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}").expect("placeholder regex is valid")
        })
    }

    let mut missing = None;

    let expanded: Vec<String> = input
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_owned();
            }

            placeholder()
                .replace_all(line, |caps: &Captures<'_>| {
                    let whole = &caps[0];
                    if caps.get(1).is_some() {
                        return whole[1..].to_owned();
                    }

                    let name = &caps[2];
                    match (std::env::var(name), caps.get(3)) {
                        (Ok(value), _) => value,
                        (Err(_), Some(default)) => default.as_str().to_owned(),
                        (Err(_), None) => {
                            missing.get_or_insert_with(|| name.to_owned());
                            String::new()
                        }
                    }
                })
                .into_owned()
        })
        .collect();

    match missing {
        Some(name) => Err(format!("environment variable `{name}` is not set")),
        None => Ok(expanded.join("\n")),
    }
}
