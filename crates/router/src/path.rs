//! Path templates and HTTP route matching.
//!
//! A template such as `/users/{id}/orders` is split on `/` into literal and
//! parameter segments. A request path matches when it has the same number of
//! segments, every literal is byte-for-byte equal, and every parameter
//! segment is non-empty. There is no wildcard or multi-segment capture.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use events::HttpGatewayEvent;

use crate::RouteError;

/// Parameter values bound by a successful match, keyed by placeholder name.
pub type PathParams = BTreeMap<String, String>;

/// One `/`-delimited piece of a [`PathTemplate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the request segment exactly (case-sensitive).
    Literal(String),
    /// Matches any non-empty request segment and binds it under this name.
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathTemplate {
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template such as `/users/{id}`.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        if !template.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash {
                template: template.to_string(),
            });
        }

        let mut names = BTreeSet::new();
        let mut segments = Vec::new();
        for piece in template.split('/') {
            let segment = match piece.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some("") => {
                    return Err(RouteError::EmptyParameter {
                        template: template.to_string(),
                    })
                }
                Some(name) if !name.contains(['{', '}']) => {
                    if !names.insert(name) {
                        return Err(RouteError::DuplicateParameter {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    Segment::Param(name.to_string())
                }
                _ if piece.contains(['{', '}']) => {
                    return Err(RouteError::MalformedSegment {
                        template: template.to_string(),
                        segment: piece.to_string(),
                    })
                }
                _ => Segment::Literal(piece.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    /// Returns `true` when both templates accept exactly the same paths,
    /// i.e. they differ at most in parameter names.
    pub fn same_shape(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Names of the parameters this template binds, in path order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches a concrete request path, returning the bound parameters.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let pieces: Vec<&str> = path.split('/').collect();
        if pieces.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, piece) in self.segments.iter().zip(pieces) {
            match segment {
                Segment::Literal(literal) if literal == piece => {}
                Segment::Param(name) if !piece.is_empty() => {
                    params.insert(name.clone(), piece.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }
}

impl FromStr for PathTemplate {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            match segment {
                Segment::Literal(literal) => f.write_str(literal)?,
                Segment::Param(name) => write!(f, "{{{name}}}")?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------

/// A (path template, method) pair identifying one HTTP registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteSpec {
    template: PathTemplate,
    method: String,
}

impl RouteSpec {
    /// Creates a route; the method is stored upper-cased.
    pub fn new(template: &str, method: &str) -> Result<Self, RouteError> {
        let method = method.trim();
        if method.is_empty() {
            return Err(RouteError::EmptyMethod);
        }
        Ok(Self {
            template: PathTemplate::parse(template)?,
            method: method.to_ascii_uppercase(),
        })
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// The upper-cased HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Two routes conflict when they have the same method and templates of the
    /// same shape; the later one could never match.
    pub fn conflicts_with(&self, other: &RouteSpec) -> bool {
        self.method == other.method && self.template.same_shape(&other.template)
    }

    /// Matches an HTTP request. `None` means "try the next route", not failure.
    pub fn matches(&self, event: &HttpGatewayEvent) -> Option<PathParams> {
        if event.http_method.to_ascii_uppercase() != self.method {
            return None;
        }
        self.template.match_path(&event.path)
    }
}

/// Parses `"GET /users/{id}"`.
impl FromStr for RouteSpec {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (method, template) = s
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| RouteError::InvalidRouteString { route: s.to_string() })?;
        Self::new(template.trim(), method)
    }
}

impl std::fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, path: &str) -> HttpGatewayEvent {
        serde_json::from_value(json!({"httpMethod": method, "path": path})).unwrap()
    }

    #[test]
    fn test_parameter_is_extracted() {
        let route = RouteSpec::new("/users/{id}", "GET").unwrap();
        let params = route.matches(&request("GET", "/users/42")).unwrap();
        assert_eq!(params, PathParams::from([("id".to_string(), "42".to_string())]));
    }

    #[test]
    fn test_segment_count_must_match() {
        let route = RouteSpec::new("/users/{id}", "GET").unwrap();
        assert_eq!(route.matches(&request("GET", "/users/42/extra")), None);
        assert_eq!(route.matches(&request("GET", "/users")), None);
    }

    #[test]
    fn test_method_must_match() {
        let route = RouteSpec::new("/users/{id}", "GET").unwrap();
        assert_eq!(route.matches(&request("POST", "/users/42")), None);
    }

    #[test]
    fn test_method_comparison_ignores_case() {
        let route = RouteSpec::new("/users", "get").unwrap();
        assert_eq!(route.method(), "GET");
        assert!(route.matches(&request("Get", "/users")).is_some());
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let route = RouteSpec::new("/Users", "GET").unwrap();
        assert_eq!(route.matches(&request("GET", "/users")), None);
    }

    #[test]
    fn test_parameter_does_not_match_empty_segment() {
        let template = PathTemplate::parse("/users/{id}").unwrap();
        assert_eq!(template.match_path("/users/"), None);
    }

    #[test]
    fn test_multiple_parameters() {
        let template = PathTemplate::parse("/users/{user_id}/orders/{order_id}").unwrap();
        let params = template.match_path("/users/7/orders/99").unwrap();
        assert_eq!(params["user_id"], "7");
        assert_eq!(params["order_id"], "99");
        assert_eq!(template.param_names().collect::<Vec<_>>(), vec!["user_id", "order_id"]);
    }

    #[test]
    fn test_invalid_templates() {
        assert!(matches!(
            PathTemplate::parse("users"),
            Err(RouteError::MissingLeadingSlash { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/{}"),
            Err(RouteError::EmptyParameter { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/{id"),
            Err(RouteError::MalformedSegment { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/users/x{id}"),
            Err(RouteError::MalformedSegment { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/a/{id}/b/{id}"),
            Err(RouteError::DuplicateParameter { .. })
        ));
        assert_eq!(RouteSpec::new("/", "  "), Err(RouteError::EmptyMethod));
    }

    #[test]
    fn test_route_string_round_trip() {
        let route: RouteSpec = "post /users/{id}".parse().unwrap();
        assert_eq!(route.method(), "POST");
        assert_eq!(route.to_string(), "POST /users/{id}");
        assert!(matches!(
            "/users".parse::<RouteSpec>(),
            Err(RouteError::InvalidRouteString { .. })
        ));
    }

    #[test]
    fn test_conflicts_ignore_parameter_names() {
        let by_id = RouteSpec::new("/users/{id}", "GET").unwrap();
        let by_uid = RouteSpec::new("/users/{uid}", "get").unwrap();
        assert!(by_id.conflicts_with(&by_uid));

        let post = RouteSpec::new("/users/{uid}", "POST").unwrap();
        assert!(!by_id.conflicts_with(&post));

        let literal = RouteSpec::new("/users/me", "GET").unwrap();
        assert!(!by_id.conflicts_with(&literal));

        let longer = RouteSpec::new("/users/{id}/orders", "GET").unwrap();
        assert!(!by_id.conflicts_with(&longer));
    }

    #[test]
    fn test_root_path() {
        let template = PathTemplate::parse("/").unwrap();
        assert_eq!(template.match_path("/"), Some(PathParams::new()));
        assert_eq!(template.match_path("/x"), None);
    }
}
