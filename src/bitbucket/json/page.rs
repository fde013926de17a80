use serde::Deserialize;
use serde::Serialize;

/// Position of a response within an offset-paginated result set.
///
/// `next_page_start` is only meaningful while `is_last_page` is `false`; the server sends it as
/// `null` (or omits it) on the last page.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub is_last_page: bool,
    #[serde(default)]
    pub start: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_start: Option<u64>,
}

/// Caller-supplied cursor for the next fetch. Zero values leave the server defaults in place.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Max amount of items in the page; `0` = server default.
    pub limit: u32,
    /// Offset of the first item to return.
    pub start: u64,
}

impl ListOptions {
    /// Options resuming right where `page` ended, keeping its limit.
    pub fn resume(page: &Page) -> Option<Self> {
        if page.is_last_page {
            return None;
        }
        page.next_page_start.map(|start| ListOptions {
            limit: page.limit,
            start,
        })
    }
}

/// Anything that can be sent as the query of a paged request.
///
/// `limit`/`start` always come from [`PageQuery::list_options`]; resource-specific filters are
/// added through [`PageQuery::query_pairs`], which must only yield the parameters actually set.
pub trait PageQuery {
    fn list_options(&self) -> ListOptions;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

impl PageQuery for ListOptions {
    fn list_options(&self) -> ListOptions {
        *self
    }
}

/// Capability of a decoded response body: "if it can report a page cursor, extract one".
pub trait Paginated {
    fn page(&self) -> Option<Page> {
        None
    }
}

/// Generic paged envelope; `{ "size": .., "isLastPage": .., "values": [..] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedList<T> {
    #[serde(flatten)]
    pub page: Page,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        PagedList {
            page: Page::default(),
            values: Vec::new(),
        }
    }
}

impl<T> Paginated for PagedList<T> {
    fn page(&self) -> Option<Page> {
        Some(self.page.clone())
    }
}

/// Opts single-resource types out of pagination.
#[macro_export]
macro_rules! impl_unpaged {
    ($($model:ty),+ $(,)?) => {
        $(impl $crate::bitbucket::json::page::Paginated for $model {})+
    };
}

impl_unpaged!(serde_json::Value);

/// Pushes `(key, value)` into `pairs` only when `value` is non-empty; mirrors the server's
/// "omit when unset" query conventions.
pub(crate) fn push_non_empty(
    pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<impl ToString>,
) {
    if let Some(value) = value {
        let value = value.to_string();
        if !value.is_empty() {
            pairs.push((key, value));
        }
    }
}
