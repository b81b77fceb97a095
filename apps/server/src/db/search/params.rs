//! Search request parsing
//!
//! Handles:
//! - Sparse filter criteria (field name -> scalar or array value)
//! - The AND/OR combinator (`_j=a|o` in query strings, `isOr` in JSON bodies)
//! - Page controls (`page`, `size`, `sort`)

use super::predicate::Combinator;
use crate::config::SearchConfig;
use crate::db::traits::Window;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Query-string keys that are page controls rather than filter fields.
const RESERVED_KEYS: [&str; 4] = ["_j", "page", "size", "sort"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One requested sort key, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SortInput")]
pub struct SortParam {
    pub field: String,
    pub direction: Direction,
}

impl SortParam {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Direction::Desc,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == Direction::Asc
    }
}

/// Accepted JSON shapes for a sort key: `"-name"` or `{"field": "name", "direction": "DESC"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SortInput {
    Text(String),
    Object {
        field: String,
        #[serde(default)]
        direction: Option<String>,
    },
}

impl TryFrom<SortInput> for SortParam {
    type Error = String;

    fn try_from(input: SortInput) -> std::result::Result<Self, Self::Error> {
        match input {
            SortInput::Text(s) => parse_sort_key(&s).map_err(|e| e.to_string()),
            SortInput::Object { field, direction } => {
                let direction = match direction.as_deref() {
                    None => Direction::Asc,
                    Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
                    Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
                    Some(other) => return Err(format!("Invalid sort direction: {}", other)),
                };
                if field.trim().is_empty() {
                    return Err("Sort field must not be empty".to_string());
                }
                Ok(SortParam {
                    field: field.trim().to_string(),
                    direction,
                })
            }
        }
    }
}

/// Parse a single sort key: `name`, `-name`, `name:asc`, `name:desc`.
pub fn parse_sort_key(raw: &str) -> Result<SortParam> {
    let mut s = raw.trim();
    let mut direction = Direction::Asc;
    if let Some(rest) = s.strip_prefix('-') {
        direction = Direction::Desc;
        s = rest;
    }

    let (field, suffix) = match s.split_once(':') {
        Some((f, d)) => (f.trim(), Some(d.trim())),
        None => (s.trim(), None),
    };
    if field.is_empty() {
        return Err(crate::Error::invalid(format!("Invalid sort value: {}", raw)));
    }

    match suffix {
        None => {}
        Some(d) if d.eq_ignore_ascii_case("asc") => direction = Direction::Asc,
        Some(d) if d.eq_ignore_ascii_case("desc") => direction = Direction::Desc,
        Some(_) => {
            return Err(crate::Error::invalid(format!(
                "Invalid sort direction in: {}",
                raw
            )))
        }
    }

    Ok(SortParam {
        field: field.to_string(),
        direction,
    })
}

/// Parse a comma-separated sort list (e.g. `name,-created`).
pub fn parse_sort(value: &str) -> Result<Vec<SortParam>> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(parse_sort_key)
        .collect()
}

/// Sparse filter input: field names mapped to raw values, plus the combinator.
///
/// Values stay untyped until a builder checks them against an entity schema.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub fields: Vec<(String, JsonValue)>,
    pub combinator: Combinator,
}

impl FilterCriteria {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            fields: Vec::new(),
            combinator,
        }
    }

    pub fn and() -> Self {
        Self::new(Combinator::And)
    }

    pub fn or() -> Self {
        Self::new(Combinator::Or)
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn from_map(fields: Map<String, JsonValue>, combinator: Combinator) -> Self {
        Self {
            fields: fields.into_iter().collect(),
            combinator,
        }
    }
}

/// Page controls as supplied by the caller (all optional).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub sort: Vec<SortParam>,
}

/// Page controls with defaults applied and limits checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Vec<SortParam>,
}

impl PageRequest {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    /// Apply defaults (page 0, configured default size) and validate the size.
    pub fn resolve(params: &PageParams, config: &SearchConfig) -> Result<Self> {
        let size = params.size.unwrap_or(config.default_page_size);
        if size == 0 {
            return Err(crate::Error::invalid("Page size must be positive"));
        }
        if size > config.max_page_size {
            return Err(crate::Error::invalid(format!(
                "Page size {} exceeds maximum allowed page size of {}",
                size, config.max_page_size
            )));
        }
        Ok(Self {
            page: params.page.unwrap_or(0),
            size,
            sort: params.sort.clone(),
        })
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }

    pub fn window(&self) -> Window {
        Window {
            offset: self.offset(),
            limit: self.size,
        }
    }
}

/// Parsed generic search request.
#[derive(Debug, Clone, Default)]
pub struct SearchParameters {
    pub criteria: FilterCriteria,
    pub paging: PageParams,
}

/// JSON body for `POST` searches.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    #[serde(default)]
    pub fields: Map<String, JsonValue>,
    #[serde(default)]
    pub is_or: bool,
    #[serde(flatten)]
    pub paging: PageParams,
}

impl SearchParameters {
    /// Parse ordered query-string items.
    ///
    /// A key that repeats becomes an array value; `sort` must not repeat.
    pub fn from_items(items: &[(String, String)]) -> Result<Self> {
        let mut fields: Vec<(String, JsonValue)> = Vec::new();
        let mut combinator = Combinator::And;
        let mut paging = PageParams::default();
        let mut sort_seen = false;

        for (key, value) in items {
            match key.as_str() {
                "_j" => {
                    combinator = Combinator::parse(value).ok_or_else(|| {
                        crate::Error::invalid(format!("Invalid _j value: {}", value))
                    })?;
                }
                "page" => {
                    let parsed: usize = value.parse().map_err(|_| {
                        crate::Error::invalid(format!("Invalid page value: {}", value))
                    })?;
                    paging.page = Some(parsed);
                }
                "size" => {
                    let parsed: usize = value.parse().map_err(|_| {
                        crate::Error::invalid(format!("Invalid size value: {}", value))
                    })?;
                    paging.size = Some(parsed);
                }
                "sort" => {
                    if sort_seen {
                        return Err(crate::Error::invalid(
                            "Search parameter 'sort' must not appear more than once",
                        ));
                    }
                    sort_seen = true;
                    paging.sort = parse_sort(value)?;
                }
                _ => push_field(&mut fields, key, value),
            }
        }

        debug_assert!(fields
            .iter()
            .all(|(k, _)| !RESERVED_KEYS.contains(&k.as_str())));

        Ok(Self {
            criteria: FilterCriteria { fields, combinator },
            paging,
        })
    }

    pub fn from_body(body: SearchBody) -> Self {
        let combinator = if body.is_or {
            Combinator::Or
        } else {
            Combinator::And
        };
        Self {
            criteria: FilterCriteria::from_map(body.fields, combinator),
            paging: body.paging,
        }
    }
}

fn push_field(fields: &mut Vec<(String, JsonValue)>, key: &str, value: &str) {
    let incoming = JsonValue::String(value.to_string());
    match fields.iter_mut().find(|(k, _)| k == key) {
        Some((_, JsonValue::Array(values))) => values.push(incoming),
        Some((_, existing)) => {
            let first = existing.take();
            *existing = JsonValue::Array(vec![first, incoming]);
        }
        None => fields.push((key.to_string(), incoming)),
    }
}

/// Split a raw query string into decoded `(key, value)` pairs.
pub fn parse_query_string(raw: &str) -> Vec<(String, String)> {
    // `application/x-www-form-urlencoded` semantics, '+' decodes to a space.
    url::form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect()
}
