//! `%{key}` placeholder substitution for translation templates.

use crate::error::RegistryError;
use crate::handler::MissingArgHandler;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

// Placeholder pattern (cached for performance). The first alternative
// matches an escaped `%%{...}` so it is not treated as a placeholder.
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"%%\{[^}]*\}|%\{([^}]+)\}").expect("valid placeholder regex"))
}

/// Substitute `%{key}` placeholders in `template` from `args`.
///
/// Each key the template references but `args` does not contain is routed
/// through `handler`; the handler either supplies replacement text or aborts
/// with [`RegistryError::MissingInterpolationArgument`]. An escaped `%%{...}`
/// renders literally, without the leading escape percent.
pub fn interpolate(
    template: &str,
    args: &BTreeMap<String, String>,
    handler: &dyn MissingArgHandler,
) -> Result<String, RegistryError> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for captures in placeholder_regex().captures_iter(template) {
        let matched = captures.get(0).expect("whole match always present");
        output.push_str(&template[last..matched.start()]);

        match captures.get(1) {
            Some(key) => match args.get(key.as_str()) {
                Some(replacement) => output.push_str(replacement),
                None => output.push_str(&handler.handle(key.as_str(), args, template)?),
            },
            // Escaped placeholder: drop the escape percent, keep the rest.
            None => output.push_str(&matched.as_str()[1..]),
        }
        last = matched.end();
    }

    output.push_str(&template[last..]);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{KeepPlaceholder, RaiseMissingArg};

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_provided_arguments() {
        let result = interpolate(
            "Hello, %{name}! You have %{count} messages.",
            &args(&[("name", "Ada"), ("count", "3")]),
            &RaiseMissingArg,
        )
        .expect("interpolate");
        assert_eq!(result, "Hello, Ada! You have 3 messages.");
    }

    #[test]
    fn test_template_without_placeholders_passes_through() {
        let result = interpolate("plain text", &args(&[]), &RaiseMissingArg).expect("interpolate");
        assert_eq!(result, "plain text");
    }

    #[test]
    fn test_missing_argument_raises_by_default() {
        let result = interpolate("Hi %{who}", &args(&[("name", "Ada")]), &RaiseMissingArg);
        match result {
            Err(RegistryError::MissingInterpolationArgument { key, args, template }) => {
                assert_eq!(key, "who");
                assert_eq!(template, "Hi %{who}");
                assert_eq!(args.get("name").map(String::as_str), Some("Ada"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_missing_argument_handler_can_substitute() {
        let result =
            interpolate("Hi %{who}", &args(&[]), &KeepPlaceholder).expect("interpolate");
        assert_eq!(result, "Hi %{who}");
    }

    #[test]
    fn test_escaped_placeholder_renders_literally() {
        let result =
            interpolate("literal %%{name} here", &args(&[]), &RaiseMissingArg).expect("interpolate");
        assert_eq!(result, "literal %{name} here");
    }

    #[test]
    fn test_repeated_placeholder_substituted_each_time() {
        let result = interpolate(
            "%{x} and %{x}",
            &args(&[("x", "y")]),
            &RaiseMissingArg,
        )
        .expect("interpolate");
        assert_eq!(result, "y and y");
    }
}
