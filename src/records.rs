use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use thiserror::Error;

/// Categorical selection that matches every record.
pub const ALL_SENTINEL: &str = "all";

/// Date layouts seen in the dashboard seed data and in filter inputs.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y"];

/// A row in a view's collection. Each view kind implements this once to
/// declare which of its fields the filter engine and the mutation handlers
/// may look at.
pub trait Record: Clone + PartialEq {
    fn id(&self) -> &str;

    /// Free-text fields searched by the text predicate.
    fn text_fields(&self) -> Vec<&str>;

    /// Wire names of the categorical fields.
    fn category_fields() -> &'static [&'static str];

    fn category(&self, field: &str) -> Option<&str>;

    fn date(&self) -> Option<&str> {
        None
    }

    fn flag_names() -> &'static [&'static str] {
        &[]
    }

    fn flag(&self, _name: &str) -> Option<bool> {
        None
    }

    fn with_flag(&self, _name: &str, _value: bool) -> Option<Self> {
        None
    }

    /// Categorical fields that may be rewritten through `set_category`.
    fn editable_categories() -> &'static [&'static str] {
        &[]
    }

    fn with_category(&self, _field: &str, _value: &str) -> Option<Self> {
        None
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("filters must be an object")]
    NotAnObject,
    #[error("filters.{0} must be a string or null")]
    NotAString(String),
    #[error("filters.categories must be an object of field -> value")]
    CategoriesNotAnObject,
    #[error("unknown category field: {0}")]
    UnknownCategory(String),
    #[error("filters.{field} is not a recognised date: {value}")]
    BadDate { field: &'static str, value: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollectionError {
    #[error("duplicate record id: {0}")]
    DuplicateRecordId(String),
    #[error("unknown flag: {0}")]
    UnknownFlag(String),
    #[error("field is not editable: {0}")]
    NotEditable(String),
    #[error("{field} cannot be set to {value:?}")]
    ReservedValue { field: String, value: String },
    #[error("update changed record id {from} to {to}")]
    IdChanged { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Equals(String),
}

impl Selection {
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(ALL_SENTINEL) {
            Selection::All
        } else {
            Selection::Equals(raw.to_string())
        }
    }

    fn admits(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Equals(want) => value == Some(want.as_str()),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Selection::All => serializer.serialize_str(ALL_SENTINEL),
            Selection::Equals(v) => serializer.serialize_str(v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryPredicate {
    pub field: String,
    pub selection: Selection,
}

/// Inclusive calendar range. A missing bound is open on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Records without a parseable date only pass an unbounded range.
    pub fn contains(&self, raw: Option<&str>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(date) = raw.and_then(parse_date) else {
            return false;
        };
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicateSet {
    pub query: String,
    pub categories: Vec<CategoryPredicate>,
    pub date_range: DateRange,
}

impl PredicateSet {
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.matches_text(record)
            && self
                .categories
                .iter()
                .all(|c| c.selection.admits(record.category(&c.field)))
            && self.date_range.contains(record.date())
    }

    fn matches_text<R: Record>(&self, record: &R) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        record
            .text_fields()
            .iter()
            .any(|f| f.to_lowercase().contains(&needle))
    }
}

fn optional_str<'a>(
    obj: &'a serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<Option<&'a str>, FilterError> {
    match obj.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => v
            .as_str()
            .map(Some)
            .ok_or_else(|| FilterError::NotAString(key.to_string())),
    }
}

fn optional_date(
    obj: &serde_json::Map<String, serde_json::Value>,
    key: &'static str,
) -> Result<Option<NaiveDate>, FilterError> {
    match optional_str(obj, key)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_date(s).map(Some).ok_or_else(|| FilterError::BadDate {
            field: key,
            value: s.to_string(),
        }),
    }
}

/// Reads the `filters` object of a list request. Category names are checked
/// against the record kind so a typo surfaces instead of silently matching
/// nothing.
pub fn parse_predicates<R: Record>(
    raw: Option<&serde_json::Value>,
) -> Result<PredicateSet, FilterError> {
    let Some(raw) = raw else {
        return Ok(PredicateSet::default());
    };
    if raw.is_null() {
        return Ok(PredicateSet::default());
    }
    let Some(obj) = raw.as_object() else {
        return Err(FilterError::NotAnObject);
    };

    let query = optional_str(obj, "query")?.unwrap_or("").to_string();

    let mut categories = Vec::new();
    match obj.get("categories") {
        None => {}
        Some(v) if v.is_null() => {}
        Some(v) => {
            let Some(map) = v.as_object() else {
                return Err(FilterError::CategoriesNotAnObject);
            };
            for (field, value) in map {
                if !R::category_fields().contains(&field.as_str()) {
                    return Err(FilterError::UnknownCategory(field.clone()));
                }
                let selection = match value {
                    serde_json::Value::Null => Selection::All,
                    serde_json::Value::String(s) => Selection::parse(s),
                    _ => return Err(FilterError::NotAString(format!("categories.{}", field))),
                };
                categories.push(CategoryPredicate {
                    field: field.clone(),
                    selection,
                });
            }
        }
    }

    Ok(PredicateSet {
        query,
        categories,
        date_range: DateRange {
            start: optional_date(obj, "startDate")?,
            end: optional_date(obj, "endDate")?,
        },
    })
}

/// Read-only projection of a collection. `total` is the size of the source so
/// an empty match can be told apart from an empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a, R> {
    pub rows: Vec<&'a R>,
    pub total: usize,
}

impl<R> FilteredView<'_, R> {
    pub fn matched(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn filter<'a, R: Record>(records: &'a [R], predicates: &PredicateSet) -> FilteredView<'a, R> {
    FilteredView {
        rows: records.iter().filter(|r| predicates.matches(*r)).collect(),
        total: records.len(),
    }
}

/// New collection with `update` applied to the record whose id matches.
/// Every other record is cloned as-is; with no match the result equals the
/// input.
pub fn update_by_id<R, F>(records: &[R], id: &str, update: F) -> Vec<R>
where
    R: Record,
    F: FnOnce(&R) -> R,
{
    let mut update = Some(update);
    records
        .iter()
        .map(|r| {
            if r.id() == id {
                if let Some(f) = update.take() {
                    return f(r);
                }
            }
            r.clone()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordCollection<R> {
    records: Vec<R>,
}

impl<R: Record> RecordCollection<R> {
    pub fn seeded(records: Vec<R>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::new();
        for r in &records {
            if !seen.insert(r.id().to_string()) {
                return Err(CollectionError::DuplicateRecordId(r.id().to_string()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn filter(&self, predicates: &PredicateSet) -> FilteredView<'_, R> {
        filter(&self.records, predicates)
    }

    /// Replaces the record `id` with `update(record)`. Returns `Ok(None)` and
    /// leaves the collection alone when no record has that id.
    pub fn apply<F>(&mut self, id: &str, update: F) -> Result<Option<&R>, CollectionError>
    where
        F: FnOnce(&R) -> R,
    {
        let Some(pos) = self.records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let next = update_by_id(&self.records, id, update);
        if next[pos].id() != id {
            return Err(CollectionError::IdChanged {
                from: id.to_string(),
                to: next[pos].id().to_string(),
            });
        }
        self.records = next;
        Ok(self.records.get(pos))
    }

    pub fn toggle(&mut self, id: &str, flag: &str) -> Result<Option<&R>, CollectionError> {
        if !R::flag_names().contains(&flag) {
            return Err(CollectionError::UnknownFlag(flag.to_string()));
        }
        self.apply(id, |r| {
            let current = r.flag(flag).unwrap_or(false);
            r.with_flag(flag, !current).unwrap_or_else(|| r.clone())
        })
    }

    pub fn set_category(
        &mut self,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<&R>, CollectionError> {
        if !R::editable_categories().contains(&field) {
            return Err(CollectionError::NotEditable(field.to_string()));
        }
        // The sentinel and blanks are not storable category values.
        if value.trim().is_empty() || value.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            return Err(CollectionError::ReservedValue {
                field: field.to_string(),
                value: value.to_string(),
            });
        }
        self.apply(id, |r| r.with_category(field, value).unwrap_or_else(|| r.clone()))
    }

    /// Distinct values of a categorical field in first-seen order. Feeds the
    /// dropdowns next to the search box.
    pub fn distinct_values(&self, field: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|r| r.category(field))
            .filter(|v| seen.insert(*v))
            .collect()
    }
}
