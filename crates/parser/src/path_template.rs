//! Path template normalization
//!
//! Swagger 2 and OpenAPI 3 write placeholders as `{name}`, Swagger 1 listings
//! sometimes as `:name`. Both become `:name`.

use regex::Regex;
use std::sync::OnceLock;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder pattern is valid"))
}

/// Normalize a raw path template
///
/// # Examples
/// ```
/// use swagger_import_parser::normalize_path_template;
///
/// assert_eq!(normalize_path_template("/pets/{petId}"), "/pets/:petId");
/// assert_eq!(normalize_path_template("/pets/:petId/"), "/pets/:petId");
/// assert_eq!(normalize_path_template(""), "/");
/// ```
pub fn normalize_path_template(raw: &str) -> String {
    let trimmed = raw.trim();
    let replaced = placeholder().replace_all(trimmed, ":$1");

    let mut path = if replaced.starts_with('/') {
        replaced.into_owned()
    } else {
        format!("/{}", replaced)
    };

    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders() {
        assert_eq!(
            normalize_path_template("/2.0/repositories/{username}/{slug}/pullrequests/{pid}"),
            "/2.0/repositories/:username/:slug/pullrequests/:pid"
        );
        assert_eq!(normalize_path_template("/pets/:petId"), "/pets/:petId");
        assert_eq!(
            normalize_path_template("/{dataset}/{version}/fields"),
            "/:dataset/:version/fields"
        );
    }

    #[test]
    fn test_slashes() {
        assert_eq!(normalize_path_template("/"), "/");
        assert_eq!(normalize_path_template("pets"), "/pets");
        assert_eq!(normalize_path_template("/pets//"), "/pets");
    }
}
