//! Route definitions and `:param` path patterns.
//!
//! Supported syntax:
//! - `/boards` - exact segments
//! - `/projects/:projectId` - a named segment (never spans `/`)
//!
//! Trailing and repeated slashes in a pathname are ignored when matching.

use serde::Serialize;
use smallvec::SmallVec;

use crate::error::{Result, RouterError};
use crate::location::PathParams;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: SmallVec<[Segment; 8]>,
}

impl PathPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: &str| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };
        let mut segments: SmallVec<[Segment; 8]> = SmallVec::new();
        for part in pattern.split('/').filter(|p| !p.is_empty()) {
            match part.strip_prefix(':') {
                Some("") => return Err(invalid("empty parameter name")),
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(n) if n == name))
                    {
                        return Err(invalid(&format!("duplicate parameter `{name}`")));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }
        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Param(n) => Some(n.as_str()),
            Segment::Static(_) => None,
        })
    }

    /// Bind params from `pathname`, or `None` if it does not fit.
    pub fn matches(&self, pathname: &str) -> Option<PathParams> {
        let parts: SmallVec<[&str; 8]> = pathname.split('/').filter(|p| !p.is_empty()).collect();
        if parts.len() != self.segments.len() {
            return None;
        }
        let mut params = PathParams::new();
        for (seg, part) in self.segments.iter().zip(parts) {
            match seg {
                Segment::Static(s) if s == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    let value = urlencoding::decode(part)
                        .map(|c| c.into_owned())
                        .unwrap_or_else(|_| part.to_string());
                    params.insert(name.clone(), value);
                }
            }
        }
        Some(params)
    }

    /// Rebuild a pathname from `params`. Extra params are ignored.
    ///
    /// The result carries no trailing slash. Empty values are rejected.
    pub fn expand(&self, params: &PathParams) -> Result<String> {
        let mut out = String::new();
        for seg in &self.segments {
            out.push('/');
            match seg {
                Segment::Static(s) => out.push_str(s),
                Segment::Param(name) => {
                    let value = params
                        .get(name)
                        .ok_or_else(|| RouterError::MissingPathParam {
                            pattern: self.raw.clone(),
                            param: name.clone(),
                        })?;
                    if value.is_empty() {
                        return Err(RouterError::InvalidPathParam {
                            pattern: self.raw.clone(),
                            param: name.clone(),
                        });
                    }
                    out.push_str(&urlencoding::encode(value));
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Ok(out)
    }
}

/// One entry of the router configuration.
#[derive(Clone, Debug, Serialize)]
pub struct Route {
    pub name: String,
    pub path: String,
    #[serde(skip)]
    pattern: PathPattern,
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.path == other.path
    }
}

impl Eq for Route {}

impl Route {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let pattern = PathPattern::new(&path)?;
        Ok(Self {
            name: name.into(),
            path,
            pattern,
        })
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }
}
