//! Expansion of `~` and environment variables in configured paths.

use std::path::PathBuf;

/// Expand a user-supplied path.
///
/// - A leading `~` or `~/` is replaced by the home directory.
/// - `$VAR` and `${VAR}` are replaced by the variable's value; unset
///   variables expand to the empty string.
/// - A `$` that does not start a variable name is kept literally.
pub fn expand_path(raw: &str) -> PathBuf {
    expand_with(raw, dirs::home_dir(), |name| std::env::var(name).ok())
}

/// Expansion with injectable home directory and variable lookup.
pub(crate) fn expand_with<F>(raw: &str, home: Option<PathBuf>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_vars(raw, &lookup);

    if let Some(home) = home {
        if expanded == "~" {
            return home;
        }
        if let Some(rest) = expanded.strip_prefix("~/") {
            return home.join(rest);
        }
    }

    PathBuf::from(expanded)
}

fn expand_vars<F>(raw: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(body) = after.strip_prefix('{') {
            match body.find('}') {
                Some(end) => {
                    out.push_str(&lookup(&body[..end]).unwrap_or_default());
                    rest = &body[end + 1..];
                }
                None => {
                    out.push_str(&rest[pos..]);
                    rest = "";
                }
            }
            continue;
        }

        let len = after
            .find(|c: char| !is_name_char(c))
            .unwrap_or(after.len());
        if len == 0 {
            out.push('$');
        } else {
            out.push_str(&lookup(&after[..len]).unwrap_or_default());
        }
        rest = &after[len..];
    }

    out.push_str(rest);
    out
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "STACKS" => Some("/srv/stacks".to_string()),
            "USER" => Some("ops".to_string()),
            _ => None,
        }
    }

    fn expand(raw: &str) -> PathBuf {
        expand_with(raw, Some(PathBuf::from("/home/ops")), lookup)
    }

    #[test]
    fn tilde_expands_to_home() {
        assert_eq!(expand("~/.config/stackmix"), PathBuf::from("/home/ops/.config/stackmix"));
        assert_eq!(expand("~"), PathBuf::from("/home/ops"));
    }

    #[test]
    fn tilde_in_middle_is_literal() {
        assert_eq!(expand("/data/~/x"), PathBuf::from("/data/~/x"));
    }

    #[test]
    fn plain_and_braced_variables() {
        assert_eq!(expand("$STACKS/db"), PathBuf::from("/srv/stacks/db"));
        assert_eq!(expand("${STACKS}/db"), PathBuf::from("/srv/stacks/db"));
        assert_eq!(expand("/home/${USER}x"), PathBuf::from("/home/opsx"));
    }

    #[test]
    fn unset_variable_expands_to_empty() {
        assert_eq!(expand("/a/$MISSING/b"), PathBuf::from("/a//b"));
    }

    #[test]
    fn lone_dollar_is_kept() {
        assert_eq!(expand("/a/$/b"), PathBuf::from("/a/$/b"));
        assert_eq!(expand("cost$"), PathBuf::from("cost$"));
    }

    #[test]
    fn unterminated_brace_is_kept_verbatim() {
        assert_eq!(expand("/a/${OOPS"), PathBuf::from("/a/${OOPS"));
    }

    #[test]
    fn no_home_leaves_tilde() {
        assert_eq!(
            expand_with("~/x", None, lookup),
            PathBuf::from("~/x")
        );
    }
}
