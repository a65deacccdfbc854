//! Path pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a template (`/cards/:cardId`, `/files/*`) into an anchored regex
//! - Match a concrete path, extracting named and wildcard parameters
//! - Compute the matched path and its slash-collapsed base path
//!
//! # Design Decisions
//! - Case-insensitive unless the pattern opts in
//! - Literal template text is escaped; only `:name` and a trailing `*` are dynamic
//! - Non-terminal patterns stop at a segment boundary so `/users` never
//!   matches `/users2`
//! - The regex is compiled lazily on first match and cached in the pattern
//! - No match is `None`, never an error

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Parameter name under which a trailing wildcard capture is stored.
pub const WILDCARD: &str = "*";

/// Characters that end a prefix match without being part of it.
pub const DEFAULT_BOUNDARY_CHARS: &str = ".~-";

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    #[error("pattern `{path}` could not be compiled: {source}")]
    Compile {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// A compiled pattern: the regex plus parameter names in capture order.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    regex: Regex,
    parameter_names: Vec<String>,
    /// Capture group standing in for the boundary look-ahead, if any.
    boundary_group: Option<usize>,
}

impl CompiledMatcher {
    /// Parameter names in encounter order; may end with [`WILDCARD`].
    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    /// Source of the generated regex.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Compile `path` with the default boundary characters.
pub fn compile_path(
    path: &str,
    case_sensitive: bool,
    match_to_end: bool,
) -> Result<CompiledMatcher, PatternError> {
    compile_path_with(path, case_sensitive, match_to_end, DEFAULT_BOUNDARY_CHARS)
}

/// Compile `path`, treating `boundary_chars` as prefix terminators.
pub fn compile_path_with(
    path: &str,
    case_sensitive: bool,
    match_to_end: bool,
    boundary_chars: &str,
) -> Result<CompiledMatcher, PatternError> {
    let normalized = normalize(path);
    let mut source = String::from("^");
    let mut parameter_names = Vec::new();

    let mut rest = normalized.as_str();
    while let Some(colon) = rest.find(':') {
        let after = &rest[colon + 1..];
        let name_len = after.find(|c: char| !is_word(c)).unwrap_or(after.len());
        if name_len == 0 {
            // Lone colon, keep it literal.
            source.push_str(&regex::escape(&rest[..=colon]));
            rest = after;
            continue;
        }

        source.push_str(&regex::escape(&rest[..colon]));
        source.push_str("([^/]+)");
        parameter_names.push(after[..name_len].to_string());
        rest = &after[name_len..];
    }
    source.push_str(&regex::escape(rest));

    let mut boundary_group = None;
    if path.ends_with('*') {
        parameter_names.push(WILDCARD.to_string());
        if path == "*" || path == "/*" {
            source.push_str("(.*)$");
        } else {
            source.push_str("(?:/(.+)|/*)$");
        }
    } else if match_to_end {
        source.push_str("/*$");
    } else {
        // The regex crate has no look-ahead: capture the terminator instead
        // and cut it off the matched path afterwards.
        boundary_group = Some(parameter_names.len() + 1);
        let class = if boundary_chars.is_empty() {
            String::new()
        } else {
            format!("[{}]|", regex::escape(boundary_chars))
        };
        source.push_str(&format!(r"(?:({class}%[0-9A-F]{{2}})|\b|/|$)"));
    }

    let regex = RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
        .map_err(|source| PatternError::Compile {
            path: path.to_string(),
            source,
        })?;

    Ok(CompiledMatcher {
        regex,
        parameter_names,
        boundary_group,
    })
}

/// Strip trailing `/` and `/*`, then force exactly one leading `/`.
fn normalize(path: &str) -> String {
    let trimmed = path.strip_suffix('*').unwrap_or(path).trim_end_matches('/');
    format!("/{}", trimmed.trim_start_matches('/'))
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Collapse a trailing run of slashes onto the preceding character.
fn collapse_trailing_slashes(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        &path[..path.len().min(1)]
    } else {
        trimmed
    }
}

/// A path template.
///
/// Value semantics: two patterns are equal when their template and flags
/// are equal, regardless of whether either has been compiled yet.
#[derive(Clone)]
pub struct PathPattern {
    path: String,
    case_sensitive: bool,
    match_to_end: bool,
    boundary_chars: String,
    compiled: OnceLock<Result<CompiledMatcher, PatternError>>,
}

impl PathPattern {
    /// Create a case-insensitive pattern that must match to the end.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            case_sensitive: false,
            match_to_end: true,
            boundary_chars: DEFAULT_BOUNDARY_CHARS.to_string(),
            compiled: OnceLock::new(),
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self.compiled = OnceLock::new();
        self
    }

    /// When false the pattern matches a prefix ending at a segment boundary.
    pub fn match_to_end(mut self, match_to_end: bool) -> Self {
        self.match_to_end = match_to_end;
        self.compiled = OnceLock::new();
        self
    }

    pub fn boundary_chars(mut self, chars: impl Into<String>) -> Self {
        self.boundary_chars = chars.into();
        self.compiled = OnceLock::new();
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_match_to_end(&self) -> bool {
        self.match_to_end
    }

    /// The compiled matcher, building it on first use.
    pub fn compile(&self) -> Result<&CompiledMatcher, &PatternError> {
        self.compiled
            .get_or_init(|| {
                compile_path_with(
                    &self.path,
                    self.case_sensitive,
                    self.match_to_end,
                    &self.boundary_chars,
                )
            })
            .as_ref()
    }

    /// Match `path` against this pattern.
    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let compiled = match self.compile() {
            Ok(compiled) => compiled,
            Err(e) => {
                tracing::warn!(pattern = %self.path, error = %e, "Unusable path pattern");
                return None;
            }
        };

        let captures = compiled.regex.captures(path)?;
        let whole = captures.get(0)?;
        let end = compiled
            .boundary_group
            .and_then(|group| captures.get(group))
            .map_or(whole.end(), |terminator| terminator.start());
        let matched_path = &path[whole.start()..end];

        let mut base_path = collapse_trailing_slashes(matched_path);
        let mut parameters = BTreeMap::new();
        for (index, name) in compiled.parameter_names.iter().enumerate() {
            let value = captures.get(index + 1).map_or("", |m| m.as_str());
            if name == WILDCARD {
                let prefix = &matched_path[..matched_path.len() - value.len()];
                base_path = collapse_trailing_slashes(prefix);
            }
            parameters.insert(name.clone(), value.to_string());
        }

        Some(PathMatch {
            pattern: self.clone(),
            matched_path: matched_path.to_string(),
            base_path: base_path.to_string(),
            parameters,
        })
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
            && self.case_sensitive == other.case_sensitive
            && self.match_to_end == other.match_to_end
            && self.boundary_chars == other.boundary_chars
    }
}

impl Eq for PathPattern {}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("path", &self.path)
            .field("case_sensitive", &self.case_sensitive)
            .field("match_to_end", &self.match_to_end)
            .field("boundary_chars", &self.boundary_chars)
            .finish_non_exhaustive()
    }
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    pub pattern: PathPattern,
    /// The portion of the input the pattern consumed.
    pub matched_path: String,
    /// `matched_path` without trailing slashes or wildcard tail.
    pub base_path: String,
    pub parameters: BTreeMap<String, String>,
}

impl PathMatch {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// The wildcard tail, if the pattern has one.
    pub fn wildcard(&self) -> Option<&str> {
        self.param(WILDCARD)
    }
}

/// Match `path` against `pattern`.
pub fn match_path(pattern: &PathPattern, path: &str) -> Option<PathMatch> {
    pattern.matches(path)
}
