//! Named API routes and positional path templates.
//!
//! # Design
//! The route table maps an operation name (`GetCustomerSkus`) to a path
//! template with positional placeholders (`customers/{0}/products/{1}/skus`)
//! and to the query keys the service expects for each logical parameter
//! (`Size` -> `size`). Call sites name logical parameters only, so a renamed
//! query key is a table edit.
//!
//! The built-in table is embedded at compile time and parsed once per
//! process on first use. Templates are validated at load time, so a
//! malformed placeholder surfaces on the first lookup rather than on the
//! first request that happens to use it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use url::Url;

use crate::error::{PartnerError, Result};

const BUILTIN_ROUTES: &str = include_str!("../config/routes.json");

static BUILTIN: LazyLock<std::result::Result<Arc<RouteRegistry>, String>> = LazyLock::new(|| {
    RouteRegistry::from_json_str(BUILTIN_ROUTES)
        .map(Arc::new)
        .map_err(|e| e.to_string())
});

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiRoute {
    pub path: String,
    #[serde(default)]
    pub parameters: HashMap<String, String>,
}

impl ApiRoute {
    /// Query key the service expects for a logical parameter name.
    pub fn parameter(&self, operation: &str, logical: &str) -> Result<&str> {
        self.parameters
            .get(logical)
            .map(String::as_str)
            .ok_or_else(|| PartnerError::UnknownParameter {
                operation: operation.to_string(),
                parameter: logical.to_string(),
            })
    }

    /// Substitute `{n}` placeholders with `args[n]`, each percent-encoded as
    /// a single path segment.
    ///
    /// Arguments without a placeholder are ignored; a placeholder without an
    /// argument is a configuration error.
    pub fn resolve_path<S: AsRef<str>>(&self, args: &[S]) -> Result<String> {
        let mut resolved = String::with_capacity(self.path.len() + 32);
        for segment in parse_template(&self.path)? {
            match segment {
                Segment::Literal(text) => resolved.push_str(text),
                Segment::Placeholder(index) => {
                    let arg = args.get(index).ok_or_else(|| {
                        PartnerError::configuration(format!(
                            "template {:?} needs argument {index} but only {} were given",
                            self.path,
                            args.len()
                        ))
                    })?;
                    resolved.push_str(&encode_segment(arg.as_ref())?);
                }
            }
        }
        Ok(resolved)
    }
}

/// Process-wide, read-only table of API routes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteRegistry {
    apis: HashMap<String, ApiRoute>,
}

impl RouteRegistry {
    /// The route table compiled into the crate, shared by every client.
    pub fn shared() -> Result<Arc<RouteRegistry>> {
        BUILTIN.clone().map_err(PartnerError::configuration)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let registry: RouteRegistry = serde_json::from_str(raw)
            .map_err(|e| PartnerError::configuration(format!("invalid route table: {e}")))?;
        for (name, route) in &registry.apis {
            parse_template(&route.path).map_err(|e| {
                PartnerError::configuration(format!("route {name}: {e}"))
            })?;
        }
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PartnerError::configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn route(&self, operation: &str) -> Result<&ApiRoute> {
        self.apis
            .get(operation)
            .ok_or_else(|| PartnerError::UnknownOperation(operation.to_string()))
    }

    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.apis.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.apis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apis.is_empty()
    }
}

/// Escape `raw` so it cannot leave its segment: `/`, `?`, `#`, `%` and
/// spaces are percent-encoded, and dot segments are escaped whole.
fn encode_segment(raw: &str) -> Result<String> {
    match raw {
        "." => return Ok("%2E".to_string()),
        ".." => return Ok("%2E%2E".to_string()),
        _ => {}
    }
    let mut url = Url::parse("http://segment.invalid/")
        .map_err(|e| PartnerError::configuration(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| PartnerError::configuration("cannot encode path segment"))?
        .pop_if_empty()
        .push(raw);
    Ok(url.path().trim_start_matches('/').to_string())
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(usize),
}

fn parse_template(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| {
            PartnerError::configuration(format!("unclosed placeholder in {template:?}"))
        })?;
        let index = after[..close].parse::<usize>().map_err(|_| {
            PartnerError::configuration(format!(
                "placeholder {{{}}} in {template:?} is not a position",
                &after[..close]
            ))
        })?;
        segments.push(Segment::Placeholder(index));
        rest = &after[close + 1..];
    }
    if rest.contains('}') {
        return Err(PartnerError::configuration(format!(
            "stray '}}' in {template:?}"
        )));
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    Ok(segments)
}
