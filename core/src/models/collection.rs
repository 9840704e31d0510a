//! Generic paged container returned by list-style operations.

use serde::{Deserialize, Serialize};

/// A page of entities plus what the service says about the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCollection<T> {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default)]
    pub links: ResourceLinks,
    #[serde(default)]
    pub attributes: ResourceAttributes,
}

impl<T> ResourceCollection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// True when the service advertised another page.
    pub fn has_more(&self) -> bool {
        self.continuation_token.is_some() || self.links.next.is_some()
    }
}

impl<T> IntoIterator for ResourceCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceLinks {
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub uri: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub headers: Vec<LinkHeader>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkHeader {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn decodes_service_envelope() {
        let page: ResourceCollection<Item> = serde_json::from_str(
            r#"{
                "totalCount": 2,
                "items": [{"id": "a"}, {"id": "b"}],
                "continuationToken": "tok",
                "links": {
                    "self": {"uri": "/invoices?size=2", "method": "GET", "headers": []},
                    "next": {"uri": "/invoices?size=2&offset=2", "method": "GET",
                             "headers": [{"key": "MS-ContinuationToken", "value": "tok"}]}
                },
                "attributes": {"objectType": "Collection"}
            }"#,
        )
        .unwrap();
        assert_eq!(page.total_count, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page.continuation_token.as_deref(), Some("tok"));
        assert_eq!(page.links.next.as_ref().unwrap().headers[0].key, "MS-ContinuationToken");
        assert_eq!(page.attributes.object_type.as_deref(), Some("Collection"));
        assert!(page.has_more());
        let ids: Vec<String> = page.into_iter().map(|i| i.id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn sparse_envelope_defaults() {
        let page: ResourceCollection<Item> = serde_json::from_str("{}").unwrap();
        assert_eq!(page.total_count, 0);
        assert!(page.is_empty());
        assert!(!page.has_more());
    }
}
