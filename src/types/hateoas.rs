use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

pub const SELF_REL: &str = "self";
pub const FIND_REL: &str = "find";

/// Response wrapper: the payload plus navigational links keyed by relation.
#[derive(Debug, Serialize, ToSchema)]
pub struct Envelope<T> {
    pub data: T,
    #[schema(value_type = BTreeMap<String, String>)]
    pub links: BTreeMap<&'static str, String>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            links: BTreeMap::new(),
        }
    }

    pub fn with_link(mut self, rel: &'static str, href: impl Into<String>) -> Self {
        self.links.insert(rel, href.into());
        self
    }

    pub fn with_self(self, href: impl Into<String>) -> Self {
        self.with_link(SELF_REL, href)
    }
}
