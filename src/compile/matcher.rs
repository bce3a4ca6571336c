use crate::types::DEFAULT_CASE_SENSITIVE;
use crate::{
    HeaderMatch, HeaderMatchSpec, HeaderValueMatch, HttpMethod, MatchCriteria, MatchSpec,
    PathMatch, PathMatchSpec, PathValueMatch, RuleError,
};

/// Build the normalized match for a rule.
///
/// Exactly one of method, path or header matching must be given; the kinds
/// are mutually exclusive. Unrecognized methods, path match types and header
/// operators are rejected rather than dropped, as are unknown keys.
pub(crate) fn build_match(rule: &str, spec: &MatchSpec) -> Result<MatchCriteria, RuleError> {
    if !spec.unrecognized.is_empty() {
        let keys: Vec<&str> = spec.unrecognized.keys().map(String::as_str).collect();
        return Err(RuleError::invalid_match(
            rule,
            format!("unrecognized field(s) {}", keys.join(", ")),
        ));
    }
    match (&spec.method_match, &spec.path_match, &spec.header_matches) {
        (Some(method), None, None) => build_method(rule, method),
        (None, Some(path), None) => build_path(rule, path),
        (None, None, Some(headers)) => build_headers(rule, headers),
        (None, None, None) => Err(RuleError::invalid_match(
            rule,
            "one of methodMatch, pathMatch or headerMatches must be set",
        )),
        _ => Err(RuleError::invalid_match(
            rule,
            format!(
                "only one of methodMatch, pathMatch or headerMatches may be set, got {}",
                spec.populated().join(" and ")
            ),
        )),
    }
}

fn build_method(rule: &str, method: &str) -> Result<MatchCriteria, RuleError> {
    HttpMethod::parse(method)
        .map(MatchCriteria::Method)
        .ok_or_else(|| {
            RuleError::invalid_match(rule, format!("unrecognized HTTP method '{method}'"))
        })
}

fn build_path(rule: &str, path: &PathMatchSpec) -> Result<MatchCriteria, RuleError> {
    let value = path.value.clone();
    let matcher = match path.match_type.to_ascii_uppercase().as_str() {
        "EXACT" => PathValueMatch::Exact(value),
        "PREFIX" => PathValueMatch::Prefix(value),
        _ => {
            return Err(RuleError::invalid_match(
                rule,
                format!("unrecognized path match type '{}'", path.match_type),
            ));
        }
    };

    Ok(MatchCriteria::Path(PathMatch {
        matcher,
        case_sensitive: path.case_sensitive.unwrap_or(DEFAULT_CASE_SENSITIVE),
    }))
}

fn build_headers(rule: &str, headers: &[HeaderMatchSpec]) -> Result<MatchCriteria, RuleError> {
    if headers.is_empty() {
        return Err(RuleError::invalid_match(rule, "headerMatches must not be empty"));
    }

    let matches = headers
        .iter()
        .map(|header| build_header(rule, header))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MatchCriteria::Headers(matches))
}

fn build_header(rule: &str, header: &HeaderMatchSpec) -> Result<HeaderMatch, RuleError> {
    let value = header.value.clone();
    let matcher = match header.operator.to_ascii_uppercase().as_str() {
        "EXACT" => HeaderValueMatch::Exact(value),
        "CONTAINS" => HeaderValueMatch::Contains(value),
        "PREFIX" => HeaderValueMatch::Prefix(value),
        _ => {
            return Err(RuleError::invalid_match(
                rule,
                format!(
                    "unrecognized operator '{}' for header '{}'",
                    header.operator, header.header_name
                ),
            ));
        }
    };

    Ok(HeaderMatch {
        name: header.header_name.clone(),
        matcher,
        case_sensitive: header.case_sensitive.unwrap_or(DEFAULT_CASE_SENSITIVE),
    })
}
