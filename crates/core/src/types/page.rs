//! Collection shapes returned by the backend.
//!
//! Some endpoints page their results inside an envelope
//! (`{"content": [...], "totalPages": 3, ...}`), others return a bare array.
//! [`Collection`] names both shapes explicitly; [`Collection::detect`] is the
//! single place where a raw JSON payload is classified.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page of results inside the backend's pagination envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub content: Vec<T>,
    /// Total number of pages for the query.
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of items across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// Zero-based page index.
    #[serde(default)]
    pub number: u32,
    /// Requested page size.
    #[serde(default)]
    pub size: u32,
}

/// Either wire shape of "a collection of `T`".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection<T> {
    /// Items wrapped in a pagination envelope.
    Paged(Page<T>),
    /// A bare JSON array.
    Plain(Vec<T>),
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self::Plain(Vec::new())
    }
}

impl Collection<Value> {
    /// Classify a raw payload.
    ///
    /// Returns `None` when the payload is neither an array nor an object with
    /// a `content` array (for example `null` or an error object).
    #[must_use]
    pub fn detect(value: Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(Self::Plain(items)),
            Value::Object(mut map) => {
                let Some(Value::Array(content)) = map.remove("content") else {
                    return None;
                };
                let field = |name: &str| map.get(name).and_then(Value::as_u64);
                let total_elements = field("totalElements").unwrap_or(content.len() as u64);
                let total_pages = field("totalPages")
                    .and_then(|n| u32::try_from(n).ok())
                    .unwrap_or(1);
                let number = field("number").and_then(|n| u32::try_from(n).ok());
                let size = field("size").and_then(|n| u32::try_from(n).ok());
                Some(Self::Paged(Page {
                    size: size.unwrap_or_else(|| u32::try_from(content.len()).unwrap_or(u32::MAX)),
                    number: number.unwrap_or(0),
                    total_pages,
                    total_elements,
                    content,
                }))
            }
            _ => None,
        }
    }
}

impl<T> Collection<T> {
    /// Convert every item, stopping at the first one `f` rejects.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Collection<U>, E> {
        Ok(match self {
            Self::Plain(items) => {
                Collection::Plain(items.into_iter().map(f).collect::<Result<_, _>>()?)
            }
            Self::Paged(page) => Collection::Paged(Page {
                content: page.content.into_iter().map(f).collect::<Result<_, _>>()?,
                total_pages: page.total_pages,
                total_elements: page.total_elements,
                number: page.number,
                size: page.size,
            }),
        })
    }

    /// Number of items in this collection (this page only, when paged).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Plain(items) => items.len(),
            Self::Paged(page) => page.content.len(),
        }
    }

    /// Whether the collection holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the envelope and keep the items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Plain(items) => items,
            Self::Paged(page) => page.content,
        }
    }
}

/// Items of one page with the paging totals kept alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total number of pages (1 for unpaged endpoints).
    pub total_pages: u32,
    /// Total number of items across all pages.
    pub total_elements: u64,
    /// Zero-based page index.
    pub page: u32,
}

impl<T> From<Collection<T>> for PageResult<T> {
    fn from(collection: Collection<T>) -> Self {
        match collection {
            Collection::Paged(page) => Self {
                items: page.content,
                total_pages: page.total_pages,
                total_elements: page.total_elements,
                page: page.number,
            },
            Collection::Plain(items) => Self {
                total_pages: 1,
                total_elements: items.len() as u64,
                page: 0,
                items,
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_detect_bare_array() {
        let collection = Collection::detect(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert!(matches!(collection, Collection::Plain(ref items) if items.len() == 2));
    }

    #[test]
    fn test_detect_envelope_keeps_totals_separate() {
        let collection = Collection::detect(json!({
            "content": [{"id": 1}, {"id": 2}],
            "totalPages": 3,
            "totalElements": 6,
            "number": 1,
        }))
        .unwrap();

        let result = PageResult::from(collection);
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_elements, 6);
        assert_eq!(result.page, 1);
    }

    #[test]
    fn test_detect_envelope_without_totals() {
        let result = PageResult::from(Collection::detect(json!({"content": [1, 2, 3]})).unwrap());
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.total_elements, 3);
    }

    #[test]
    fn test_detect_rejects_other_shapes() {
        assert!(Collection::detect(json!(null)).is_none());
        assert!(Collection::detect(json!(7)).is_none());
        assert!(Collection::detect(json!({"message": "oops"})).is_none());
        assert!(Collection::detect(json!({"content": "not a list"})).is_none());
    }

    #[test]
    fn test_try_map_preserves_envelope() {
        let collection = Collection::detect(json!({"content": [1, 2, 3], "totalPages": 2}))
            .unwrap()
            .try_map(|v| v.as_i64().ok_or("not a number"))
            .unwrap();
        assert_eq!(collection.len(), 3);
        let result = PageResult::from(collection);
        assert_eq!(result.items, vec![1, 2, 3]);
        assert_eq!(result.total_pages, 2);
    }

    #[test]
    fn test_try_map_stops_at_first_rejected_item() {
        let result = Collection::detect(json!([1, "x", 3]))
            .unwrap()
            .try_map(|v| v.as_i64().ok_or(v));
        assert_eq!(result, Err(json!("x")));
    }

    #[test]
    fn test_plain_reports_single_page() {
        let result = PageResult::from(Collection::Plain(vec!["a", "b"]));
        assert_eq!(result.total_pages, 1);
        assert_eq!(result.total_elements, 2);
        assert!(Collection::<u8>::default().is_empty());
    }
}
