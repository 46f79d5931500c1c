//! List query extraction: pagination, sort and free-form filters
//!
//! The whole query string is read as a string map, then the reserved keys
//! (`page`, `limit`, `_sort`, `_order`) are parsed out; everything else is
//! kept as filter input for the handler to interpret. Empty values read as
//! absent, per the empty-string-means-not-set convention.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use std::collections::HashMap;

use cursus_api_types::pagination::{
    ListInput, PaginationInput, SortDirection, SortInput, MAX_PAGE_SIZE,
};

use crate::errors::WebError;

/// Parsed list query parameters
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub pagination: PaginationInput,
    pub sort: Option<SortInput>,
    /// Remaining query parameters, interpreted per endpoint
    pub filters: HashMap<String, String>,
}

impl ListQuery {
    /// Build from a raw query-string map, validating pagination
    pub fn from_map(mut map: HashMap<String, String>) -> Result<Self, WebError> {
        let page = Self::take_number(&mut map, "page")?;
        let limit = Self::take_number(&mut map, "limit")?;

        if let Some(page) = page {
            if page == 0 {
                return Err(WebError::bad_request(
                    "Invalid pagination: page must be greater than 0",
                ));
            }
        }
        if let Some(limit) = limit {
            if limit == 0 {
                return Err(WebError::bad_request(
                    "Invalid pagination: limit must be greater than 0",
                ));
            }
            if limit > MAX_PAGE_SIZE {
                return Err(WebError::bad_request(format!(
                    "Invalid pagination: maximum limit is {}",
                    MAX_PAGE_SIZE
                )));
            }
        }

        let sort_field = map.remove("_sort");
        let sort_order = map.remove("_order");
        let sort = sort_field.map(|field| SortInput {
            field,
            direction: sort_order.as_deref().map(|order| {
                if order.eq_ignore_ascii_case("desc") {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                }
            }),
        });

        Ok(Self {
            pagination: PaginationInput { page, limit },
            sort,
            filters: map,
        })
    }

    fn take_number(map: &mut HashMap<String, String>, key: &str) -> Result<Option<u32>, WebError> {
        match map.remove(key) {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => raw.parse::<u32>().map(Some).map_err(|_| {
                WebError::bad_request(format!("Invalid query parameter: {}={}", key, raw))
            }),
        }
    }

    /// Non-empty filter value for a key
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Raw filter value for a key, empty string included. Used where an
    /// explicitly empty submission must be distinguished from an absent one.
    pub fn filter_raw(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Convert to the standard list input
    pub fn to_list_input(&self) -> ListInput {
        ListInput {
            pagination: Some(self.pagination.clone()),
            sort: self.sort.clone(),
        }
    }
}

/// Extract and validate query parameters
#[derive(Debug)]
pub struct QueryParams(pub ListQuery);

impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(map) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|err| WebError::bad_request(format!("Invalid query parameters: {}", err)))?;

        Ok(QueryParams(ListQuery::from_map(map)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_pagination_parsing() {
        let query = ListQuery::from_map(map(&[("page", "3"), ("module", "sessions")])).unwrap();
        assert_eq!(query.pagination.get_page(), 3);
        assert_eq!(query.pagination.get_limit(), 25);
        assert_eq!(query.filter("module"), Some("sessions"));
    }

    #[test]
    fn test_invalid_pagination_rejected() {
        assert!(ListQuery::from_map(map(&[("page", "0")])).is_err());
        assert!(ListQuery::from_map(map(&[("limit", "0")])).is_err());
        assert!(ListQuery::from_map(map(&[("limit", "200")])).is_err());
        assert!(ListQuery::from_map(map(&[("page", "abc")])).is_err());
    }

    #[test]
    fn test_sort_parsing() {
        let query =
            ListQuery::from_map(map(&[("_sort", "created_at"), ("_order", "DESC")])).unwrap();
        let sort = query.sort.unwrap();
        assert_eq!(sort.field, "created_at");
        assert_eq!(sort.get_direction(), SortDirection::Desc);
    }

    #[test]
    fn test_empty_filter_reads_as_absent() {
        let query = ListQuery::from_map(map(&[("actif", "")])).unwrap();
        assert_eq!(query.filter("actif"), None);
        assert_eq!(query.filter_raw("actif"), Some(""));
    }
}
