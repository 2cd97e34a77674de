/// Splits `name@version` into its parts, keeping the leading `@` of scoped
/// names. A spec without a version yields `"latest"`.
#[must_use]
pub fn parse_pkg_spec(spec: &str) -> (String, String) {
    let (scope, rest) = spec
        .strip_prefix('@')
        .map_or(("", spec), |rest| ("@", rest));

    match rest.split_once('@') {
        Some((name, version)) if !name.is_empty() && !version.is_empty() => {
            (format!("{scope}{name}"), version.to_string())
        }
        Some((name, _)) if !name.is_empty() => (format!("{scope}{name}"), "latest".to_string()),
        _ => (spec.to_string(), "latest".to_string()),
    }
}
