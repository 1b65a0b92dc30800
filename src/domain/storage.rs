//! Storage directory normalisation.

/// Expand a leading `~` and `$VAR` / `${VAR}` references in a path.
///
/// `lookup` resolves environment variables; `~` resolves through `HOME`.
/// Unknown variables are left untouched, matching shell-less expansion.
pub fn expand_path<F>(raw: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let tilde_expanded = expand_home(raw, &lookup);
    expand_vars(&tilde_expanded, &lookup)
}

fn expand_home<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => return raw.to_string(),
    };

    match lookup("HOME") {
        Some(home) => format!("{}{rest}", home.trim_end_matches('/')),
        None => raw.to_string(),
    }
}

fn expand_vars<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(index) = rest.find('$') {
        output.push_str(&rest[..index]);
        let after = &rest[index + 1..];

        let (name, consumed, braced) = if let Some(inner) = after.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => (&inner[..end], end + 2, true),
                None => ("", 0, true),
            }
        } else {
            let end = after
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
                .unwrap_or(after.len());
            (&after[..end], end, false)
        };

        if name.is_empty() {
            output.push('$');
            rest = after;
            continue;
        }

        match lookup(name) {
            Some(value) => output.push_str(&value),
            None if braced => {
                output.push_str("${");
                output.push_str(name);
                output.push('}');
            }
            None => {
                output.push('$');
                output.push_str(name);
            }
        }
        rest = &after[consumed..];
    }

    output.push_str(rest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(name: &str) -> Option<String> {
        match name {
            "HOME" => Some("/home/ada".to_string()),
            "USER" => Some("ada".to_string()),
            _ => None,
        }
    }

    #[test]
    fn expands_home_prefix() {
        assert_eq!(expand_path("~/podcasts", env), "/home/ada/podcasts");
        assert_eq!(expand_path("~", env), "/home/ada");
    }

    #[test]
    fn leaves_other_users_home_alone() {
        assert_eq!(expand_path("~bob/podcasts", env), "~bob/podcasts");
    }

    #[test]
    fn expands_plain_and_braced_variables() {
        assert_eq!(
            expand_path("$HOME/archive/$USER", env),
            "/home/ada/archive/ada"
        );
        assert_eq!(expand_path("/srv/${USER}_pods", env), "/srv/ada_pods");
    }

    #[test]
    fn unknown_variables_are_preserved() {
        assert_eq!(expand_path("/srv/$NOPE/x", env), "/srv/$NOPE/x");
        assert_eq!(expand_path("/srv/${NOPE}/x", env), "/srv/${NOPE}/x");
    }

    #[test]
    fn lone_dollar_signs_survive() {
        assert_eq!(expand_path("/srv/$/x$", env), "/srv/$/x$");
        assert_eq!(expand_path("/srv/${unterminated", env), "/srv/${unterminated");
    }
}
