use crate::domain::{CheckIn, NotificationSetting, RouteStop, StudentProfile, TripLog};
use crate::records::{parse_predicates, CollectionError, FilterError, Record, RecordCollection};
use crate::seed;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewKind {
    CheckIns,
    TripHistory,
    Notifications,
    StudentRoster,
    RouteStops,
}

impl ViewKind {
    pub const ALL: [ViewKind; 5] = [
        ViewKind::CheckIns,
        ViewKind::TripHistory,
        ViewKind::Notifications,
        ViewKind::StudentRoster,
        ViewKind::RouteStops,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::CheckIns => "checkIns",
            ViewKind::TripHistory => "tripHistory",
            ViewKind::Notifications => "notifications",
            ViewKind::StudentRoster => "studentRoster",
            ViewKind::RouteStops => "routeStops",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw.trim())
    }
}

#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Collection(#[from] CollectionError),
    #[error("dialog name must not be empty")]
    EmptyDialogName,
}

/// How a record is shown to the UI. Rows may carry hints the presentation
/// layer uses to enable or disable controls.
pub trait Row: Record + Serialize {
    fn row_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Row for CheckIn {
    fn row_json(&self) -> Value {
        let mut v = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = v.as_object_mut() {
            obj.insert("canCheckOut".to_string(), json!(self.checked_in));
        }
        v
    }
}

impl Row for TripLog {}
impl Row for NotificationSetting {}
impl Row for StudentProfile {}
impl Row for RouteStop {}

/// Operations every mounted view answers, whatever its record kind.
pub trait ViewOps {
    fn total(&self) -> usize;
    fn list(&self, filters: Option<&Value>) -> Result<Value, ViewError>;
    fn toggle(&mut self, record_id: &str, flag: &str) -> Result<Option<Value>, ViewError>;
    fn set_field(
        &mut self,
        record_id: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, ViewError>;
    fn options(&self) -> Value;
}

impl<R: Row> ViewOps for RecordCollection<R> {
    fn total(&self) -> usize {
        self.records().len()
    }

    fn list(&self, filters: Option<&Value>) -> Result<Value, ViewError> {
        let predicates = parse_predicates::<R>(filters)?;
        let view = self.filter(&predicates);
        let rows: Vec<Value> = view.rows.iter().map(|r| r.row_json()).collect();
        Ok(json!({
            "rows": rows,
            "matched": view.matched(),
            "total": view.total,
            "empty": view.is_empty(),
            "filters": predicates,
        }))
    }

    fn toggle(&mut self, record_id: &str, flag: &str) -> Result<Option<Value>, ViewError> {
        Ok(RecordCollection::toggle(self, record_id, flag)?.map(|r| r.row_json()))
    }

    fn set_field(
        &mut self,
        record_id: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, ViewError> {
        Ok(self
            .set_category(record_id, field, value)?
            .map(|r| r.row_json()))
    }

    fn options(&self) -> Value {
        let mut out = serde_json::Map::new();
        for field in R::category_fields() {
            out.insert(field.to_string(), json!(self.distinct_values(field)));
        }
        Value::Object(out)
    }
}

/// A view's state for as long as the UI keeps it on screen.
pub struct MountedView {
    pub kind: ViewKind,
    collection: Box<dyn ViewOps>,
    dialogs: BTreeSet<String>,
}

impl MountedView {
    pub fn mount(kind: ViewKind) -> Result<Self, CollectionError> {
        let collection: Box<dyn ViewOps> = match kind {
            ViewKind::CheckIns => Box::new(RecordCollection::seeded(seed::check_ins())?),
            ViewKind::TripHistory => Box::new(RecordCollection::seeded(seed::trip_logs())?),
            ViewKind::Notifications => {
                Box::new(RecordCollection::seeded(seed::notification_settings())?)
            }
            ViewKind::StudentRoster => Box::new(RecordCollection::seeded(seed::student_roster())?),
            ViewKind::RouteStops => Box::new(RecordCollection::seeded(seed::route_stops())?),
        };
        Ok(Self {
            kind,
            collection,
            dialogs: BTreeSet::new(),
        })
    }

    pub fn total(&self) -> usize {
        self.collection.total()
    }

    pub fn list(&self, filters: Option<&Value>) -> Result<Value, ViewError> {
        self.collection.list(filters)
    }

    pub fn toggle(&mut self, record_id: &str, flag: &str) -> Result<Option<Value>, ViewError> {
        self.collection.toggle(record_id, flag)
    }

    pub fn set_field(
        &mut self,
        record_id: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Value>, ViewError> {
        self.collection.set_field(record_id, field, value)
    }

    pub fn options(&self) -> Value {
        self.collection.options()
    }

    /// Returns false when the dialog was already open.
    pub fn open_dialog(&mut self, name: &str) -> Result<bool, ViewError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ViewError::EmptyDialogName);
        }
        Ok(self.dialogs.insert(name.to_string()))
    }

    /// Returns false when the dialog was not open.
    pub fn close_dialog(&mut self, name: &str) -> bool {
        self.dialogs.remove(name.trim())
    }

    pub fn open_dialogs(&self) -> Vec<&str> {
        self.dialogs.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_round_trip_through_wire_names() {
        for kind in ViewKind::ALL {
            assert_eq!(ViewKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ViewKind::parse("busMap"), None);
    }

    #[test]
    fn check_in_rows_expose_check_out_hint() {
        let view = MountedView::mount(ViewKind::CheckIns).expect("mount");
        let listed = view
            .list(Some(&json!({ "query": "alex" })))
            .expect("list");
        assert_eq!(listed["matched"], json!(1));
        assert_eq!(listed["total"], json!(7));
        let row = &listed["rows"][0];
        assert_eq!(row["canCheckOut"], row["checkedIn"]);
    }

    #[test]
    fn empty_match_reports_total() {
        let view = MountedView::mount(ViewKind::TripHistory).expect("mount");
        let listed = view
            .list(Some(&json!({ "query": "nobody rides this bus" })))
            .expect("list");
        assert_eq!(listed["matched"], json!(0));
        assert_eq!(listed["total"], json!(7));
        assert_eq!(listed["rows"], json!([]));
    }

    #[test]
    fn toggle_on_missing_record_is_a_no_op() {
        let mut view = MountedView::mount(ViewKind::Notifications).expect("mount");
        let before = view.list(None).expect("list");
        assert_eq!(view.toggle("no-such-setting", "enabled").expect("toggle"), None);
        assert_eq!(view.list(None).expect("list"), before);
    }

    #[test]
    fn options_list_distinct_routes() {
        let view = MountedView::mount(ViewKind::CheckIns).expect("mount");
        assert_eq!(
            view.options()["route"],
            json!(["Morning Route #103", "Morning Route #105", "Afternoon Route #201"])
        );
    }

    #[test]
    fn dialogs_open_and_close_once() {
        let mut view = MountedView::mount(ViewKind::StudentRoster).expect("mount");
        assert!(view.open_dialog("addStudent").expect("open"));
        assert!(!view.open_dialog("addStudent").expect("reopen"));
        assert_eq!(view.open_dialogs(), vec!["addStudent"]);
        assert!(view.close_dialog("addStudent"));
        assert!(!view.close_dialog("addStudent"));
        assert!(matches!(view.open_dialog("  "), Err(ViewError::EmptyDialogName)));
    }
}
