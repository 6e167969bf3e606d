//! Query keys and the wire shapes of the remote list RPC

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BackofficeError, Result};

/// Page sizes offered when no configuration overrides them
pub const DEFAULT_PAGE_SIZES: [u32; 3] = [10, 50, 100];

/// Sort direction sent to the list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn is_descending(self) -> bool {
        self == SortOrder::Desc
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// Sort column plus direction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, descending: bool) -> Self {
        Self {
            key: key.into(),
            descending,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }
}

/// The settled inputs that identify one list request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub page: u32,
    pub size: u32,
    pub sort_key: String,
    pub descending: bool,
    pub search: String,
    pub offset: u64,
}

impl QueryKey {
    /// Derive a key from settled filter values. Surrounding whitespace in the
    /// search term is not significant, so it is dropped here.
    pub fn new(page: u32, size: u32, sort: &SortSpec, search: &str) -> Self {
        Self {
            page,
            size,
            sort_key: sort.key.clone(),
            descending: sort.descending,
            search: search.trim().to_string(),
            offset: page_offset(page, size),
        }
    }

    /// Wire form of this key
    pub fn to_request(&self) -> ListRequest {
        ListRequest {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            limit: self.size,
            offset: self.offset,
            sort_key: self.sort_key.clone(),
            order: SortOrder::from_descending(self.descending),
        }
    }
}

/// Request body of the list RPC
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub limit: u32,
    pub offset: u64,
    #[serde(rename = "sortKey")]
    pub sort_key: String,
    pub order: SortOrder,
}

/// Response body of the list RPC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Zero-based row offset of the first row on `page`; page 0 is treated as 1
pub fn page_offset(page: u32, size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(size)
}

/// Number of pages needed to show `total` rows; 0 when there are no rows.
///
/// A zero size never reaches this point (sizes come from the allow-list),
/// but it yields 0 rather than dividing by zero.
pub fn total_page_count(total: u64, size: u32) -> u32 {
    if size == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The enumerated set of page sizes a screen offers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizes(Vec<u32>);

impl PageSizes {
    pub fn new(sizes: Vec<u32>) -> Result<Self> {
        if sizes.is_empty() {
            return Err(BackofficeError::Config(
                "page size list cannot be empty".to_string(),
            ));
        }
        if sizes.contains(&0) {
            return Err(BackofficeError::Config(
                "page sizes must be greater than zero".to_string(),
            ));
        }
        let mut sizes = sizes;
        sizes.sort_unstable();
        sizes.dedup();
        Ok(Self(sizes))
    }

    pub fn contains(&self, size: u32) -> bool {
        self.0.contains(&size)
    }

    /// Reject sizes outside the allow-list
    pub fn validate(&self, size: u32) -> Result<u32> {
        if self.contains(size) {
            Ok(size)
        } else {
            Err(BackofficeError::InvalidPageSize {
                size,
                allowed: self.0.clone(),
            })
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn smallest(&self) -> u32 {
        self.0[0]
    }

    /// The size after `current`, wrapping around
    pub fn next_after(&self, current: u32) -> u32 {
        match self.0.iter().position(|&s| s == current) {
            Some(i) => self.0[(i + 1) % self.0.len()],
            None => self.smallest(),
        }
    }
}

impl Default for PageSizes {
    fn default() -> Self {
        Self(DEFAULT_PAGE_SIZES.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_examples() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(2, 50), 50);
        assert_eq!(page_offset(0, 10), 0);
    }

    #[test]
    fn test_total_page_count_examples() {
        assert_eq!(total_page_count(95, 10), 10);
        assert_eq!(total_page_count(100, 10), 10);
        assert_eq!(total_page_count(101, 10), 11);
        assert_eq!(total_page_count(3, 10), 1);
        assert_eq!(total_page_count(0, 10), 0);
        assert_eq!(total_page_count(10, 0), 0);
    }

    #[test]
    fn test_query_key_offset_derivation() {
        let key = QueryKey::new(3, 10, &SortSpec::ascending("name"), "");
        assert_eq!(key.offset, 20);

        let request = key.to_request();
        assert_eq!(request.limit, 10);
        assert_eq!(request.offset, 20);
        assert_eq!(request.search, None);
        assert_eq!(request.order, SortOrder::Asc);
    }

    #[test]
    fn test_request_serialization_uses_wire_names() {
        let key = QueryKey::new(1, 10, &SortSpec::new("created_at", true), " dup ");
        let json = serde_json::to_value(key.to_request()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "search": "dup",
                "limit": 10,
                "offset": 0,
                "sortKey": "created_at",
                "order": "desc"
            })
        );
    }

    #[test]
    fn test_request_omits_blank_search() {
        let key = QueryKey::new(1, 10, &SortSpec::ascending("name"), "   ");
        let json = serde_json::to_value(key.to_request()).unwrap();
        assert!(json.get("search").is_none());
    }

    #[test]
    fn test_trailing_space_does_not_change_key() {
        let sort = SortSpec::ascending("name");
        assert_eq!(QueryKey::new(1, 10, &sort, "dup "), QueryKey::new(1, 10, &sort, "dup"));
        assert_eq!(QueryKey::new(1, 10, &sort, "  ").search, "");
    }

    #[test]
    fn test_list_result_deserializes() {
        let result: ListResult<String> =
            serde_json::from_str(r#"{"items":["a","b"],"total":7}"#).unwrap();
        assert_eq!(result.items, vec!["a", "b"]);
        assert_eq!(result.total, 7);
    }

    #[test]
    fn test_page_sizes_validation() {
        let sizes = PageSizes::default();
        assert_eq!(sizes.validate(50).unwrap(), 50);
        assert!(matches!(
            sizes.validate(25),
            Err(BackofficeError::InvalidPageSize { size: 25, .. })
        ));
        assert!(PageSizes::new(vec![]).is_err());
        assert!(PageSizes::new(vec![0, 10]).is_err());
    }

    #[test]
    fn test_page_sizes_cycle() {
        let sizes = PageSizes::new(vec![100, 10, 50]).unwrap();
        assert_eq!(sizes.as_slice(), &[10, 50, 100]);
        assert_eq!(sizes.next_after(10), 50);
        assert_eq!(sizes.next_after(100), 10);
        assert_eq!(sizes.next_after(33), 10);
    }
}
