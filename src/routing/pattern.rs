//! Path template compilation and matching.
//!
//! # Responsibilities
//! - Compile templates like `/tasks/:id` into segment matchers
//! - Match concrete paths and extract named parameters
//!
//! # Design Decisions
//! - Exact segment count; no prefix or partial matching
//! - Trailing slashes are not normalized: `/tasks/` has an extra empty
//!   segment and does not match `/tasks`
//! - A `:name` segment captures any non-empty run of non-slash characters

use std::collections::HashMap;

/// Parameters captured from a matched path, keyed by segment name.
pub type PathParams = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a template into a matchable pattern.
    ///
    /// Segments prefixed with `:` become named captures; everything else is
    /// matched verbatim.
    pub fn compile(template: &str) -> Self {
        let segments = template
            .split('/')
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(segment.to_string()),
            })
            .collect();

        Self {
            template: template.to_string(),
            segments,
        }
    }

    /// Match a concrete path against this pattern.
    ///
    /// Returns the captured parameters on a match, `None` otherwise.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(literal) => {
                    if literal != part {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), (*part).to_string());
                }
            }
        }

        Some(params)
    }

    /// The original template string, for logging.
    pub fn template(&self) -> &str {
        &self.template
    }
}
