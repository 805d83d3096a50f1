//! Paginated list queries and responses.
//!
//! Every admin collection answers with the same envelope:
//! `{ "<resource>": [...], "pagination": { "total": n } }`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::ApiError;

pub const DEFAULT_LIMIT: u32 = 10;

/// Filters for a collection request. Empty filters are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<String>,
    pub search: Option<String>,
    pub verified: Option<bool>,
    /// Workout type filter, sent as `type`
    pub kind: Option<String>,
    pub extra: Vec<(String, String)>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            status: None,
            search: None,
            verified: None,
            kind: None,
            extra: Vec::new(),
        }
    }
}

impl ListQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.verified = Some(verified);
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        let filters = [
            ("status", self.status.clone()),
            ("search", self.search.clone()),
            ("verified", self.verified.map(|v| v.to_string())),
            ("type", self.kind.clone()),
        ];
        for (key, value) in filters {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                pairs.push((key.to_string(), value));
            }
        }
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Default, Deserialize)]
struct Pagination {
    #[serde(default)]
    total: u64,
}

impl<T: DeserializeOwned> Page<T> {
    /// Pull `key` and `pagination.total` out of a list envelope.
    pub fn from_envelope(
        mut envelope: Value,
        key: &str,
        query: &ListQuery,
    ) -> Result<Self, ApiError> {
        let items = envelope
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| {
                ApiError::InvalidResponse(format!("missing `{}` in list response", key))
            })?;
        let items: Vec<T> = serde_json::from_value(items)?;

        let pagination: Pagination = match envelope.get_mut("pagination").map(Value::take) {
            Some(value) => serde_json::from_value(value)?,
            None => Pagination::default(),
        };
        // Without a total the page itself is the whole collection
        let total = if pagination.total == 0 {
            items.len() as u64
        } else {
            pagination.total
        };

        Ok(Self {
            items,
            total,
            page: query.page,
            limit: query.limit,
        })
    }
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.limit))
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_pairs() {
        let pairs = ListQuery::default().to_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "1".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_filters_skip_empty_values() {
        let pairs = ListQuery::page(2, 25)
            .status("suspended")
            .search("  ")
            .verified(false)
            .kind("cardio")
            .param("sort", "-createdAt")
            .to_pairs();

        assert!(pairs.contains(&("status".to_string(), "suspended".to_string())));
        assert!(pairs.contains(&("verified".to_string(), "false".to_string())));
        assert!(pairs.contains(&("type".to_string(), "cardio".to_string())));
        assert!(pairs.contains(&("sort".to_string(), "-createdAt".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "search"));
    }

    #[test]
    fn test_page_from_envelope() {
        let envelope = json!({
            "gyms": [{ "_id": "a" }, { "_id": "b" }],
            "pagination": { "total": 23 }
        });
        let page: Page<Value> =
            Page::from_envelope(envelope, "gyms", &ListQuery::page(1, 10)).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 23);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_missing_key_is_invalid_response() {
        let envelope = json!({ "users": [], "pagination": { "total": 0 } });
        let err =
            Page::<Value>::from_envelope(envelope, "gyms", &ListQuery::default()).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_total_pages_edges() {
        let page = Page::<Value> {
            items: Vec::new(),
            total: 20,
            page: 2,
            limit: 10,
        };
        assert_eq!(page.total_pages(), 2);
        assert!(!page.has_next());

        let unlimited = Page::<Value> { limit: 0, ..page };
        assert_eq!(unlimited.total_pages(), 0);
    }
}
