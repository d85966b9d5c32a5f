// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path-pattern route table keyed by interaction category.
//!
//! Patterns are `/`-separated; a `{name}` segment binds any non-empty token.
//! Among all patterns of the right length whose literals match, the one with
//! the fewest variables wins; remaining ties go to the earliest registration.
//! The table is built once at startup and only read afterwards.

use std::collections::HashMap;

use modmail_core::InteractionCategory;
use thiserror::Error;

/// Invalid route registrations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("pattern `{pattern}` binds variable `{name}` more than once")]
    DuplicateVariable { pattern: String, name: String },

    #[error("pattern `{pattern}` contains an empty segment or variable name")]
    EmptySegment { pattern: String },

    #[error("pattern `{pattern}` has the same shape as already registered `{existing}`")]
    Duplicate { pattern: String, existing: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

impl Segment {
    /// Whether two segments accept exactly the same tokens.
    fn same_shape(&self, other: &Segment) -> bool {
        match (self, other) {
            (Segment::Literal(a), Segment::Literal(b)) => a == b,
            (Segment::Variable(_), Segment::Variable(_)) => true,
            _ => false,
        }
    }
}

struct Route<H> {
    pattern: String,
    segments: Vec<Segment>,
    variables: usize,
    handler: H,
}

impl<H> Route<H> {
    fn bind(&self, tokens: &[&str]) -> Option<RouteVars> {
        if tokens.len() != self.segments.len() {
            return None;
        }
        let mut vars = RouteVars::default();
        for (segment, token) in self.segments.iter().zip(tokens) {
            match segment {
                Segment::Literal(literal) if literal == token => {}
                Segment::Literal(_) => return None,
                Segment::Variable(_) if token.is_empty() => return None,
                Segment::Variable(name) => vars.0.push((name.clone(), (*token).to_string())),
            }
        }
        Some(vars)
    }
}

/// Variables bound by a matched pattern, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteVars(Vec<(String, String)>);

impl RouteVars {
    /// Value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    /// The pattern that matched, as registered.
    pub pattern: &'a str,
    pub vars: RouteVars,
}

/// Route table for all interaction categories.
pub struct RouteTable<H> {
    routes: HashMap<InteractionCategory, Vec<Route<H>>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `pattern` under `category`.
    pub fn register(
        &mut self,
        category: InteractionCategory,
        pattern: &str,
        handler: H,
    ) -> Result<&mut Self, RouteError> {
        let segments = parse_pattern(pattern)?;
        let routes = self.routes.entry(category).or_default();

        if let Some(existing) = routes.iter().find(|route| {
            route.segments.len() == segments.len()
                && route
                    .segments
                    .iter()
                    .zip(&segments)
                    .all(|(a, b)| a.same_shape(b))
        }) {
            return Err(RouteError::Duplicate {
                pattern: pattern.to_string(),
                existing: existing.pattern.clone(),
            });
        }

        let variables = segments
            .iter()
            .filter(|s| matches!(s, Segment::Variable(_)))
            .count();
        routes.push(Route {
            pattern: pattern.to_string(),
            segments,
            variables,
            handler,
        });
        Ok(self)
    }

    /// Finds the most specific pattern matching `identifier`.
    ///
    /// `None` means no handler exists for this identifier, which callers
    /// treat as an ignorable event rather than a failure.
    pub fn lookup(
        &self,
        category: InteractionCategory,
        identifier: &str,
    ) -> Option<RouteMatch<'_, H>> {
        let tokens = tokenize(identifier);
        let mut best: Option<(&Route<H>, RouteVars)> = None;
        for route in self.routes.get(&category)? {
            // Strictly fewer variables wins, so an earlier route keeps ties.
            if best
                .as_ref()
                .is_some_and(|(current, _)| current.variables <= route.variables)
            {
                continue;
            }
            if let Some(vars) = route.bind(&tokens) {
                best = Some((route, vars));
            }
        }
        best.map(|(route, vars)| RouteMatch {
            handler: &route.handler,
            pattern: &route.pattern,
            vars,
        })
    }

    /// Number of registered patterns in `category`.
    pub fn len(&self, category: InteractionCategory) -> usize {
        self.routes.get(&category).map_or(0, Vec::len)
    }
}

fn tokenize(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

fn parse_pattern(pattern: &str) -> Result<Vec<Segment>, RouteError> {
    let mut segments = Vec::new();
    for token in tokenize(pattern) {
        let segment = match token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            Some(name) => {
                if name.is_empty() {
                    return Err(RouteError::EmptySegment {
                        pattern: pattern.to_string(),
                    });
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Variable(existing) if existing == name))
                {
                    return Err(RouteError::DuplicateVariable {
                        pattern: pattern.to_string(),
                        name: name.to_string(),
                    });
                }
                Segment::Variable(name.to_string())
            }
            None if token.is_empty() => {
                return Err(RouteError::EmptySegment {
                    pattern: pattern.to_string(),
                });
            }
            None => Segment::Literal(token.to_string()),
        };
        segments.push(segment);
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const COMPONENT: InteractionCategory = InteractionCategory::Component;

    fn table() -> RouteTable<&'static str> {
        let mut table = RouteTable::new();
        table
            .register(InteractionCategory::Command, "/ping", "ping")
            .unwrap()
            .register(COMPONENT, "/report-button/{role}", "button-any")
            .unwrap()
            .register(COMPONENT, "/report-button/admin", "button-admin")
            .unwrap()
            .register(COMPONENT, "/{kind}/{id}", "generic")
            .unwrap();
        table
    }

    #[test]
    fn literal_route_matches_exactly() {
        let t = table();
        let m = t.lookup(InteractionCategory::Command, "/ping").unwrap();
        assert_eq!(*m.handler, "ping");
        assert!(m.vars.is_empty());
        assert!(t.lookup(InteractionCategory::Command, "/pong").is_none());
    }

    #[test]
    fn variables_are_bound_by_name() {
        let t = table();
        let m = t.lookup(COMPONENT, "/report-button/1234").unwrap();
        assert_eq!(*m.handler, "button-any");
        assert_eq!(m.pattern, "/report-button/{role}");
        assert_eq!(m.vars.get("role"), Some("1234"));
    }

    #[test]
    fn fewest_variables_wins() {
        let t = table();
        let m = t.lookup(COMPONENT, "/report-button/admin").unwrap();
        assert_eq!(*m.handler, "button-admin");
    }

    #[test]
    fn ties_go_to_first_registered() {
        let mut t = RouteTable::new();
        t.register(COMPONENT, "/a/{x}", "first").unwrap();
        t.register(COMPONENT, "/{y}/b", "second").unwrap();
        assert_eq!(*t.lookup(COMPONENT, "/a/b").unwrap().handler, "first");
    }

    #[test]
    fn segment_count_must_match() {
        let t = table();
        assert!(t.lookup(COMPONENT, "/report-button").is_none());
        assert!(t.lookup(COMPONENT, "/report-button/1/2").is_none());
    }

    #[test]
    fn variables_reject_empty_tokens() {
        let t = table();
        assert!(t.lookup(COMPONENT, "/report-button/").is_none());
    }

    #[test]
    fn categories_are_isolated() {
        let t = table();
        assert!(t.lookup(InteractionCategory::Modal, "/ping").is_none());
        assert!(t.lookup(COMPONENT, "/ping").is_none());
        assert_eq!(t.len(COMPONENT), 3);
        assert_eq!(t.len(InteractionCategory::Modal), 0);
    }

    #[test]
    fn rejects_duplicate_variable_names() {
        let mut t = RouteTable::new();
        assert_eq!(
            t.register(COMPONENT, "/x/{a}/{a}", ()).err(),
            Some(RouteError::DuplicateVariable {
                pattern: "/x/{a}/{a}".into(),
                name: "a".into()
            })
        );
    }

    #[test]
    fn rejects_empty_segments() {
        let mut t = RouteTable::new();
        assert!(matches!(
            t.register(COMPONENT, "/x//y", ()),
            Err(RouteError::EmptySegment { .. })
        ));
        assert!(matches!(
            t.register(COMPONENT, "/x/{}", ()),
            Err(RouteError::EmptySegment { .. })
        ));
    }

    #[test]
    fn rejects_same_shape_twice() {
        let mut t = RouteTable::new();
        t.register(COMPONENT, "/x/{a}", ()).unwrap();
        assert!(matches!(
            t.register(COMPONENT, "/x/{b}", ()),
            Err(RouteError::Duplicate { .. })
        ));
        // Same shape in another category is fine.
        t.register(InteractionCategory::Modal, "/x/{b}", ()).unwrap();
    }

    proptest! {
        #[test]
        fn lookup_is_deterministic(path in "(/[a-z0-9-]{0,6}){1,4}") {
            let t = table();
            let first = t.lookup(COMPONENT, &path).map(|m| (*m.handler, m.vars));
            for _ in 0..3 {
                let again = t.lookup(COMPONENT, &path).map(|m| (*m.handler, m.vars));
                prop_assert_eq!(&again, &first);
            }
        }
    }
}
