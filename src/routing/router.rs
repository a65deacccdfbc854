//! Deep-link route table.
//!
//! # Responsibilities
//! - Store routes as (name, pattern, resolver) in registration order
//! - Turn a list of path segments into a path and find the first matching route
//! - Return the resolved value or an explicit `None` for unknown links
//!
//! # Design Decisions
//! - Immutable after construction
//! - First match wins: register specific routes before catch-alls
//! - Resolvers are plain `fn` pointers over the `PathMatch`, so the table
//!   stays `Clone` and `Debug`

use std::fmt;

use crate::routing::matcher::{PathMatch, PathPattern};

/// A single named route.
#[derive(Clone)]
pub struct Route<T> {
    name: &'static str,
    pattern: PathPattern,
    resolve: fn(&PathMatch) -> T,
}

impl<T> Route<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }
}

impl<T> fmt::Debug for Route<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.path())
            .finish()
    }
}

/// Ordered table of deep-link routes.
#[derive(Debug, Clone)]
pub struct DeepLinkRouter<T> {
    routes: Vec<Route<T>>,
}

impl<T> DeepLinkRouter<T> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Append a route. Earlier routes take precedence.
    pub fn route(mut self, name: &'static str, pattern: PathPattern, resolve: fn(&PathMatch) -> T) -> Self {
        self.routes.push(Route {
            name,
            pattern,
            resolve,
        });
        self
    }

    pub fn routes(&self) -> &[Route<T>] {
        &self.routes
    }

    /// Resolve a path string.
    pub fn resolve_path(&self, path: &str) -> Option<(&'static str, T)> {
        self.routes.iter().find_map(|route| {
            route
                .pattern
                .matches(path)
                .map(|m| (route.name, (route.resolve)(&m)))
        })
    }

    /// Resolve deep-link segments such as `["cards", "42"]`.
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Option<(&'static str, T)> {
        let path = join_segments(segments);
        let resolved = self.resolve_path(&path);
        if resolved.is_none() {
            tracing::debug!(path = %path, "No route for deep link");
        }
        resolved
    }
}

impl<T> Default for DeepLinkRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Join segments into an absolute path, skipping empty and `/` segments.
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    let parts: Vec<&str> = segments
        .iter()
        .map(|s| s.as_ref().trim_matches('/'))
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", parts.join("/"))
}
