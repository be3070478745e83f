//! Common traits and envelopes for Favro resources

use serde::Deserialize;

use crate::config::api;

/// Common trait for all Favro resources (organizations, boards, columns, cards, users)
///
/// Provides a unified interface for identification and name/ID matching,
/// which the lookups behind `select` and the card/column commands rely on.
pub trait FavroResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by ID or name (exact, then case-insensitive name).
    /// Empty input matches nothing.
    fn matches(&self, input: &str) -> bool {
        !input.is_empty()
            && (self.id() == input
                || self.name() == input
                || self.name().eq_ignore_ascii_case(input))
    }
}

/// Find the single resource matching `input`, preferring an exact ID match
pub fn find_match<'a, T: FavroResource>(items: &'a [T], input: &str) -> Option<&'a T> {
    if input.trim().is_empty() {
        return None;
    }
    items
        .iter()
        .find(|item| item.id() == input)
        .or_else(|| items.iter().find(|item| item.name() == input))
        .or_else(|| items.iter().find(|item| item.matches(input)))
}

/// Opaque continuation handle for a paginated listing.
///
/// Only the transport creates and consumes cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    request_id: String,
    page: u32,
}

impl PageCursor {
    /// Zero-based page number this cursor requests
    pub(crate) fn page(&self) -> u32 {
        self.page
    }

    /// Query parameters that request the page this cursor points at
    pub(crate) fn query(&self) -> Query {
        Query::new()
            .push(api::REQUEST_ID_PARAM, self.request_id.clone())
            .push(api::PAGE_PARAM, self.page.to_string())
    }
}

/// Paginated list envelope returned by every Favro list endpoint
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub entities: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

impl<T> Page<T> {
    /// Cursor for the page after `requested`, the page number this envelope
    /// was fetched with.
    ///
    /// `None` on the last page, and also when the server answered with a page
    /// other than the one requested, so a listing can never loop.
    pub fn next_cursor(&self, requested: u32) -> Option<PageCursor> {
        let request_id = self.request_id.as_deref().filter(|id| !id.is_empty())?;
        if self.page != requested {
            return None;
        }
        let next = requested.checked_add(1)?;
        (next < self.pages).then(|| PageCursor {
            request_id: request_id.to_string(),
            page: next,
        })
    }
}

/// Ordered, owned query parameters. Values are percent-encoded on render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.push((key.to_string(), value.into()));
        self
    }

    /// Push only when a value is present
    pub fn push_opt(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append every parameter of `other`
    pub fn extend(mut self, other: Query) -> Self {
        self.params.extend(other.params);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Render as `k=v&k2=v2` (no leading `?`)
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl FavroResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn resource(id: &str, name: &str) -> TestResource {
        TestResource {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_matches_by_id_and_name() {
        let r = resource("res-123", "Sprint Board");
        assert!(r.matches("res-123"));
        assert!(r.matches("Sprint Board"));
        assert!(r.matches("sprint board"));
        assert!(!r.matches("other"));
    }

    #[test]
    fn test_find_match_prefers_id() {
        let items = vec![resource("Backlog", "first"), resource("b-2", "Backlog")];
        assert_eq!(find_match(&items, "Backlog").unwrap().id(), "Backlog");
        assert_eq!(find_match(&items, "first").unwrap().id(), "Backlog");
        assert!(find_match(&items, "missing").is_none());
    }

    #[test]
    fn test_page_next_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "entities": [{"id": 1}],
            "page": 0,
            "pages": 3,
            "requestId": "req-1",
            "limit": 100
        }))
        .unwrap();
        let cursor = page.next_cursor(0).unwrap();
        assert_eq!(cursor.query().encode(), "requestId=req-1&page=1");
        assert_eq!(cursor.page(), 1);
    }

    #[test]
    fn test_page_last_page_has_no_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "entities": [],
            "page": 2,
            "pages": 3,
            "requestId": "req-1"
        }))
        .unwrap();
        assert!(page.next_cursor(page.page).is_none());
    }

    #[test]
    fn test_page_without_request_id_has_no_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "entities": [{"id": 1}],
            "page": 0,
            "pages": 5
        }))
        .unwrap();
        assert!(page.next_cursor(page.page).is_none());
    }

    #[test]
    fn test_page_not_advancing_has_no_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "entities": [{"id": 1}],
            "page": 0,
            "pages": 2,
            "requestId": "req-1"
        }))
        .unwrap();
        // Asked for page 1, server answered page 0 again
        assert!(page.next_cursor(1).is_none());
    }

    #[test]
    fn test_page_at_u32_max_has_no_cursor() {
        let page: Page<serde_json::Value> = serde_json::from_value(serde_json::json!({
            "entities": [],
            "page": u32::MAX,
            "pages": u32::MAX,
            "requestId": "req-1"
        }))
        .unwrap();
        assert!(page.next_cursor(u32::MAX).is_none());
    }

    #[test]
    fn test_empty_input_matches_nothing() {
        let items = vec![resource("r-1", "")];
        assert!(!items[0].matches(""));
        assert!(find_match(&items, "").is_none());
        assert!(find_match(&items, "  ").is_none());
    }

    #[test]
    fn test_page_requires_entities() {
        let result: std::result::Result<Page<serde_json::Value>, _> =
            serde_json::from_value(serde_json::json!({"page": 0, "pages": 1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_query_encoding() {
        let query = Query::new()
            .push("widgetCommonId", "w 1&2")
            .push_opt("columnId", None)
            .push_opt("archived", Some("true"));
        assert_eq!(query.encode(), "widgetCommonId=w%201%262&archived=true");
        assert!(Query::new().is_empty());
    }
}
