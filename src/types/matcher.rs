use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// -- Caller-supplied match specifications -----------------------------------

/// A path match as the caller supplies it.
///
/// `match_type` is kept as text so that unrecognized values can be reported
/// as [`RuleError::InvalidMatchSpec`](crate::RuleError::InvalidMatchSpec)
/// rather than silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMatchSpec {
    pub match_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl PathMatchSpec {
    #[must_use]
    pub fn new(match_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            match_type: match_type.into(),
            value: value.into(),
            case_sensitive: None,
        }
    }

    #[must_use]
    pub fn exact(value: impl Into<String>) -> Self {
        Self::new("EXACT", value)
    }

    #[must_use]
    pub fn prefix(value: impl Into<String>) -> Self {
        Self::new("PREFIX", value)
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

/// A single header match as the caller supplies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMatchSpec {
    pub header_name: String,
    pub operator: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_sensitive: Option<bool>,
}

impl HeaderMatchSpec {
    #[must_use]
    pub fn new(
        header_name: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            header_name: header_name.into(),
            operator: operator.into(),
            value: value.into(),
            case_sensitive: None,
        }
    }

    #[must_use]
    pub fn exact(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(header_name, "EXACT", value)
    }

    #[must_use]
    pub fn contains(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(header_name, "CONTAINS", value)
    }

    #[must_use]
    pub fn prefix(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(header_name, "PREFIX", value)
    }

    #[must_use]
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }
}

/// The union of match kinds a rule may carry. Exactly one must be set.
///
/// Keys of a deserialized rule that name no known field end up in
/// `unrecognized`; a rule carrying any of them is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_match: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_match: Option<PathMatchSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_matches: Option<Vec<HeaderMatchSpec>>,
    #[serde(flatten, skip_serializing_if = "BTreeMap::is_empty")]
    pub unrecognized: BTreeMap<String, serde_json::Value>,
}

impl MatchSpec {
    /// Names of the match kinds that are populated, in declaration order.
    pub(crate) fn populated(&self) -> Vec<&'static str> {
        let mut kinds = Vec::with_capacity(3);
        if self.method_match.is_some() {
            kinds.push("methodMatch");
        }
        if self.path_match.is_some() {
            kinds.push("pathMatch");
        }
        if self.header_matches.is_some() {
            kinds.push("headerMatches");
        }
        kinds
    }
}

// -- Normalized match criteria ----------------------------------------------

/// HTTP methods a method match can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Connect,
    Trace,
}

impl HttpMethod {
    const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Connect,
        HttpMethod::Trace,
    ];

    /// Parse a method name, ignoring ASCII case.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison applied to a request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathValueMatch {
    Exact(String),
    Prefix(String),
}

/// Comparison applied to a header value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderValueMatch {
    Exact(String),
    Contains(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMatch {
    #[serde(rename = "match")]
    pub matcher: PathValueMatch,
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderMatch {
    pub name: String,
    #[serde(rename = "match")]
    pub matcher: HeaderValueMatch,
    pub case_sensitive: bool,
}

/// The normalized match of a compiled rule. Serializes as the body of the
/// provisioning layer's `httpMatch` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MatchCriteria {
    #[serde(rename = "method")]
    Method(HttpMethod),
    #[serde(rename = "pathMatch")]
    Path(PathMatch),
    #[serde(rename = "headerMatches")]
    Headers(Vec<HeaderMatch>),
}

impl fmt::Display for PathValueMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathValueMatch::Exact(v) => write!(f, "exact \"{v}\""),
            PathValueMatch::Prefix(v) => write!(f, "prefix \"{v}\""),
        }
    }
}

impl fmt::Display for HeaderValueMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValueMatch::Exact(v) => write!(f, "exact \"{v}\""),
            HeaderValueMatch::Contains(v) => write!(f, "contains \"{v}\""),
            HeaderValueMatch::Prefix(v) => write!(f, "prefix \"{v}\""),
        }
    }
}

impl fmt::Display for MatchCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchCriteria::Method(m) => write!(f, "method {m}"),
            MatchCriteria::Path(p) => write!(f, "path {}", p.matcher),
            MatchCriteria::Headers(headers) => {
                write!(f, "headers [")?;
                for (i, h) in headers.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{} {}", h.name, h.matcher)?;
                }
                write!(f, "]")
            }
        }
    }
}
