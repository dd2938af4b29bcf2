//! Named routes and the values used to build `Location` headers
//!
//! A [`RouteLink`] is an unresolved location: a route name plus the values
//! to fill its placeholders with. A [`RouteTable`] owns the templates and
//! turns links into concrete paths.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;
use url::form_urlencoded;

/// Errors that occur while resolving a [`RouteLink`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// No route is registered under the name
    #[error("no route named `{name}`")]
    UnknownRoute { name: String },

    /// A placeholder in the template has no value
    #[error("route `{route}` requires a value for `{{{placeholder}}}`")]
    MissingValue { route: String, placeholder: String },

    /// A route with this name was already registered
    #[error("route `{name}` is already registered")]
    Duplicate { name: String },

    /// The template has an unterminated or empty placeholder, a stray `}`,
    /// or does not start with `/`
    #[error("invalid route template `{template}`")]
    InvalidTemplate { template: String },
}

/// Ordered values substituted into a route template
///
/// Values whose key has no matching placeholder end up in the query string,
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteValues(IndexMap<String, String>);

impl RouteValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any earlier value under the same key
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
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

impl<K, V> FromIterator<(K, V)> for RouteValues
where
    K: Into<String>,
    V: fmt::Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |values, (k, v)| values.with(k, v))
    }
}

/// Unresolved location pointing at a named route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLink {
    name: String,
    values: RouteValues,
}

impl RouteLink {
    pub fn new(name: impl Into<String>, values: RouteValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Name of the target route
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values for the route's placeholders
    pub const fn values(&self) -> &RouteValues {
        &self.values
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Parsed `{name}`-style path template, the syntax axum routes use
#[derive(Debug, Clone, PartialEq, Eq)]
struct Template {
    raw: String,
    segments: Vec<Segment>,
}

impl Template {
    fn parse(raw: &str) -> Result<Self, RouteError> {
        let invalid = || RouteError::InvalidTemplate {
            template: raw.to_owned(),
        };

        if !raw.starts_with('/') {
            return Err(invalid());
        }

        let mut segments = Vec::new();
        let mut rest = raw;

        while let Some(open) = rest.find('{') {
            if rest[..open].contains('}') {
                return Err(invalid());
            }
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_owned()));
            }
            let close = rest[open..].find('}').ok_or_else(invalid)? + open;
            // `{*rest}` wildcards bind the same way as plain placeholders
            let name = rest[open + 1..close].trim_start_matches('*');
            if name.is_empty() || name.contains('{') {
                return Err(invalid());
            }
            segments.push(Segment::Placeholder(name.to_owned()));
            rest = &rest[close + 1..];
        }

        if rest.contains('}') {
            return Err(invalid());
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_owned()));
        }

        Ok(Self {
            raw: raw.to_owned(),
            segments,
        })
    }

    fn render(&self, route: &str, values: &RouteValues) -> Result<String, RouteError> {
        let mut path = String::with_capacity(self.raw.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Placeholder(name) => {
                    let value = values.get(name).ok_or_else(|| RouteError::MissingValue {
                        route: route.to_owned(),
                        placeholder: name.clone(),
                    })?;
                    path.push_str(&encode_segment(value));
                }
            }
        }

        let extra: Vec<_> = values.iter().filter(|(key, _)| !self.binds(key)).collect();
        if !extra.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(extra)
                .finish();
            path.push('?');
            path.push_str(&query);
        }

        Ok(path)
    }

    fn binds(&self, key: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Placeholder(name) if name == key))
    }
}

fn encode_segment(value: &str) -> String {
    // form encoding turns spaces into `+`, which is literal inside a path
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Registry of named route templates
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, Template>,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template such as `/items/{id}` under a name
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Duplicate`] if the name is taken, or
    /// [`RouteError::InvalidTemplate`] if the template cannot be parsed or
    /// does not start with `/`
    pub fn insert(&mut self, name: impl Into<String>, template: &str) -> Result<(), RouteError> {
        let name = name.into();
        if self.routes.contains_key(&name) {
            return Err(RouteError::Duplicate { name });
        }
        let template = Template::parse(template)?;
        self.routes.insert(name, template);
        Ok(())
    }

    /// Template registered under a name
    pub fn template(&self, name: &str) -> Option<&str> {
        self.routes.get(name).map(|t| t.raw.as_str())
    }

    /// Resolve a link into a path (plus query for surplus values)
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownRoute`] if the name is not registered, or
    /// [`RouteError::MissingValue`] if a placeholder has no value
    pub fn resolve(&self, link: &RouteLink) -> Result<String, RouteError> {
        let template = self.routes.get(link.name()).ok_or_else(|| RouteError::UnknownRoute {
            name: link.name().to_owned(),
        })?;

        template.render(link.name(), link.values())
    }
}
