//! HATEOAS links.

use serde::{Deserialize, Serialize};

/// A related follow-up call returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub rel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl Links {
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: None,
        }
    }
}

/// Find the link with the given `rel`.
pub fn find_link<'a>(links: &'a [Links], rel: &str) -> Option<&'a Links> {
    links.iter().find(|link| link.rel == rel)
}
