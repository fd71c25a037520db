//! Query string serialization for list endpoints
//!
//! Only set fields are written, in a fixed order, with camelCase keys and
//! form-urlencoded values. `decode_task_query(build_task_query(q)) == q` and
//! `build_task_query(decode_task_query(s)) == s` for every canonical `s`.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::models::TaskStatus;
use crate::utils::errors::{PayTaskError, Result};

/// Incremental query string writer that skips unset and empty values
pub struct QueryBuilder {
    serializer: form_urlencoded::Serializer<'static, String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            serializer: form_urlencoded::Serializer::new(String::new()),
        }
    }

    pub fn push<V: fmt::Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let rendered = value.to_string();
            if !rendered.is_empty() {
                self.serializer.append_pair(key, &rendered);
            }
        }
        self
    }

    pub fn finish(mut self) -> String {
        self.serializer.finish()
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    Reward,
    Deadline,
    Title,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Reward => "reward",
            SortField::Deadline => "deadline",
            SortField::Title => "title",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "reward" => Ok(SortField::Reward),
            "deadline" => Ok(SortField::Deadline),
            "title" => Ok(SortField::Title),
            other => Err(format!("unknown sort field '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

/// Filters for task discovery
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskQuery {
    pub status: Option<TaskStatus>,
    pub category: Option<String>,
    pub min_reward: Option<f64>,
    pub max_reward: Option<f64>,
    pub search: Option<String>,
    pub created_by: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl TaskQuery {
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Serialize task filters into a query string (no leading `?`)
pub fn build_task_query(query: &TaskQuery) -> String {
    QueryBuilder::new()
        .push("status", query.status)
        .push("category", query.category.as_deref())
        .push("minReward", query.min_reward)
        .push("maxReward", query.max_reward)
        .push("search", query.search.as_deref())
        .push("createdBy", query.created_by.as_deref())
        .push("sortBy", query.sort_by)
        .push("sortOrder", query.sort_order)
        .push("page", query.page)
        .push("limit", query.limit)
        .finish()
}

/// Parse a query string produced by [`build_task_query`].
///
/// A leading `?` is accepted and unknown keys are ignored.
pub fn decode_task_query(input: &str) -> Result<TaskQuery> {
    let input = input.strip_prefix('?').unwrap_or(input);
    let mut query = TaskQuery::default();

    for (key, value) in form_urlencoded::parse(input.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "status" => query.status = Some(parse_field(&key, &value)?),
            "category" => query.category = Some(value.into_owned()),
            "minReward" => query.min_reward = Some(parse_amount(&key, &value)?),
            "maxReward" => query.max_reward = Some(parse_amount(&key, &value)?),
            "search" => query.search = Some(value.into_owned()),
            "createdBy" => query.created_by = Some(value.into_owned()),
            "sortBy" => query.sort_by = Some(parse_field(&key, &value)?),
            "sortOrder" => query.sort_order = Some(parse_field(&key, &value)?),
            "page" => query.page = Some(parse_field(&key, &value)?),
            "limit" => query.limit = Some(parse_field(&key, &value)?),
            _ => {}
        }
    }

    Ok(query)
}

fn parse_field<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| PayTaskError::InvalidInput(format!("Invalid value '{}' for {}: {}", value, key, e)))
}

fn parse_amount(key: &str, value: &str) -> Result<f64> {
    let amount: f64 = parse_field(key, value)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(PayTaskError::InvalidInput(format!("Invalid amount '{}' for {}", value, key)));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    #[test]
    fn test_empty_query() {
        assert_eq!(build_task_query(&TaskQuery::default()), "");
        assert_eq!(decode_task_query("").unwrap(), TaskQuery::default());
    }

    #[test]
    fn test_field_order_and_encoding() {
        let query = TaskQuery {
            status: Some(TaskStatus::Active),
            search: Some("cat photos & more".to_string()),
            min_reward: Some(0.5),
            page: Some(2),
            limit: Some(20),
            ..Default::default()
        };
        assert_eq!(
            build_task_query(&query),
            "status=active&minReward=0.5&search=cat+photos+%26+more&page=2&limit=20"
        );
    }

    #[test]
    fn test_decode_ignores_unknown_and_leading_mark() {
        let query = decode_task_query("?sortBy=reward&sortOrder=desc&utm_source=mail").unwrap();
        assert_eq!(query.sort_by, Some(SortField::Reward));
        assert_eq!(query.sort_order, Some(SortOrder::Desc));
        assert!(query.status.is_none());
    }

    #[test]
    fn test_decode_rejects_malformed_values() {
        assert_matches!(decode_task_query("page=two"), Err(PayTaskError::InvalidInput(_)));
        assert_matches!(decode_task_query("status=archived"), Err(PayTaskError::InvalidInput(_)));
        assert_matches!(decode_task_query("minReward=-1"), Err(PayTaskError::InvalidInput(_)));
        assert_matches!(decode_task_query("maxReward=inf"), Err(PayTaskError::InvalidInput(_)));
    }

    #[test]
    fn test_query_builder_skips_empty() {
        let query = QueryBuilder::new()
            .push("unreadOnly", Some(true))
            .push("search", Some(""))
            .push::<u32>("page", None)
            .finish();
        assert_eq!(query, "unreadOnly=true");
    }

    fn text() -> impl Strategy<Value = Option<String>> {
        proptest::option::of("[a-zA-Z0-9 &=+%/?é-]{1,16}")
    }

    fn amount() -> impl Strategy<Value = Option<f64>> {
        proptest::option::of((0u32..100_000).prop_map(|cents| cents as f64 / 100.0))
    }

    prop_compose! {
        fn task_query()(
            status in proptest::option::of(proptest::sample::select(TaskStatus::ALL.to_vec())),
            category in text(),
            min_reward in amount(),
            max_reward in amount(),
            search in text(),
            created_by in text(),
            sort_by in proptest::option::of(proptest::sample::select(vec![
                SortField::CreatedAt, SortField::Reward, SortField::Deadline, SortField::Title,
            ])),
            sort_order in proptest::option::of(proptest::sample::select(vec![SortOrder::Asc, SortOrder::Desc])),
            page in proptest::option::of(1u32..500),
            limit in proptest::option::of(1u32..100),
        ) -> TaskQuery {
            TaskQuery { status, category, min_reward, max_reward, search, created_by, sort_by, sort_order, page, limit }
        }
    }

    proptest! {
        #[test]
        fn prop_query_roundtrip(query in task_query()) {
            let encoded = build_task_query(&query);
            let decoded = decode_task_query(&encoded).unwrap();
            prop_assert_eq!(&decoded, &query);
            prop_assert_eq!(build_task_query(&decoded), encoded);
        }
    }
}
