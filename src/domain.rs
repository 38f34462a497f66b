use crate::records::Record;
use serde::Serialize;

/// One student on a driver's boarding list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub stop: String,
    pub route: String,
    pub pickup_time: String,
    pub checked_in: bool,
    pub checked_out: bool,
}

impl Record for CheckIn {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.stop.as_str()]
    }

    fn category_fields() -> &'static [&'static str] {
        &["route", "grade"]
    }

    fn category(&self, field: &str) -> Option<&str> {
        match field {
            "route" => Some(self.route.as_str()),
            "grade" => Some(self.grade.as_str()),
            _ => None,
        }
    }

    fn flag_names() -> &'static [&'static str] {
        &["checkedIn", "checkedOut"]
    }

    fn flag(&self, name: &str) -> Option<bool> {
        match name {
            "checkedIn" => Some(self.checked_in),
            "checkedOut" => Some(self.checked_out),
            _ => None,
        }
    }

    // Check-out is not gated on check-in; rows expose `canCheckOut` instead.
    fn with_flag(&self, name: &str, value: bool) -> Option<Self> {
        let mut next = self.clone();
        match name {
            "checkedIn" => next.checked_in = value,
            "checkedOut" => next.checked_out = value,
            _ => return None,
        }
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLog {
    pub id: String,
    pub date: String,
    pub student: String,
    pub route: String,
    pub pickup: String,
    pub dropoff: String,
    pub pickup_time: String,
    pub dropoff_time: String,
    pub driver: String,
    pub status: String,
}

impl Record for TripLog {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.student.as_str(),
            self.pickup.as_str(),
            self.dropoff.as_str(),
            self.driver.as_str(),
        ]
    }

    fn category_fields() -> &'static [&'static str] {
        &["route", "status"]
    }

    fn category(&self, field: &str) -> Option<&str> {
        match field {
            "route" => Some(self.route.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn date(&self) -> Option<&str> {
        Some(self.date.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSetting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub channel: String,
    pub enabled: bool,
}

impl Record for NotificationSetting {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn category_fields() -> &'static [&'static str] {
        &["category", "channel"]
    }

    fn category(&self, field: &str) -> Option<&str> {
        match field {
            "category" => Some(self.category.as_str()),
            "channel" => Some(self.channel.as_str()),
            _ => None,
        }
    }

    fn flag_names() -> &'static [&'static str] {
        &["enabled"]
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "enabled").then_some(self.enabled)
    }

    fn with_flag(&self, name: &str, value: bool) -> Option<Self> {
        (name == "enabled").then(|| NotificationSetting {
            enabled: value,
            ..self.clone()
        })
    }

    fn editable_categories() -> &'static [&'static str] {
        &["channel"]
    }

    fn with_category(&self, field: &str, value: &str) -> Option<Self> {
        (field == "channel").then(|| NotificationSetting {
            channel: value.to_string(),
            ..self.clone()
        })
    }
}

/// Admin roster entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub id: String,
    pub name: String,
    pub grade: String,
    pub guardian: String,
    pub address: String,
    pub route: String,
    pub status: String,
}

impl Record for StudentProfile {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.guardian.as_str(),
            self.address.as_str(),
        ]
    }

    fn category_fields() -> &'static [&'static str] {
        &["route", "grade", "status"]
    }

    fn category(&self, field: &str) -> Option<&str> {
        match field {
            "route" => Some(self.route.as_str()),
            "grade" => Some(self.grade.as_str()),
            "status" => Some(self.status.as_str()),
            _ => None,
        }
    }

    fn editable_categories() -> &'static [&'static str] {
        &["route", "status"]
    }

    fn with_category(&self, field: &str, value: &str) -> Option<Self> {
        let mut next = self.clone();
        match field {
            "route" => next.route = value.to_string(),
            "status" => next.status = value.to_string(),
            _ => return None,
        }
        Some(next)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub id: String,
    pub route: String,
    pub name: String,
    pub address: String,
    pub scheduled_time: String,
    pub students: u32,
    pub completed: bool,
}

impl Record for RouteStop {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.address.as_str()]
    }

    fn category_fields() -> &'static [&'static str] {
        &["route"]
    }

    fn category(&self, field: &str) -> Option<&str> {
        (field == "route").then_some(self.route.as_str())
    }

    fn flag_names() -> &'static [&'static str] {
        &["completed"]
    }

    fn flag(&self, name: &str) -> Option<bool> {
        (name == "completed").then_some(self.completed)
    }

    fn with_flag(&self, name: &str, value: bool) -> Option<Self> {
        (name == "completed").then(|| RouteStop {
            completed: value,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{parse_predicates, RecordCollection};
    use crate::seed;
    use serde_json::json;

    #[test]
    fn alex_query_finds_one_check_in() {
        let c = RecordCollection::seeded(seed::check_ins()).expect("seed");
        let p = parse_predicates::<CheckIn>(Some(&json!({ "query": "alex" }))).expect("parse");
        let view = c.filter(&p);
        assert_eq!(view.total, 7);
        assert_eq!(view.matched(), 1);
        assert_eq!(view.rows[0].name, "Alex Thompson");
    }

    #[test]
    fn route_filter_keeps_source_order() {
        let c = RecordCollection::seeded(seed::check_ins()).expect("seed");
        let p = parse_predicates::<CheckIn>(Some(&json!({
            "query": "",
            "categories": { "route": "Morning Route #103" }
        })))
        .expect("parse");
        let got: Vec<&str> = c.filter(&p).rows.iter().map(|r| r.id.as_str()).collect();
        let want: Vec<&str> = c
            .records()
            .iter()
            .filter(|r| r.route == "Morning Route #103")
            .map(|r| r.id.as_str())
            .collect();
        assert!(!want.is_empty());
        assert_eq!(got, want);
    }

    #[test]
    fn single_day_range_finds_one_trip() {
        let c = RecordCollection::seeded(seed::trip_logs()).expect("seed");
        let p = parse_predicates::<TripLog>(Some(&json!({
            "startDate": "2025-04-18",
            "endDate": "2025-04-18"
        })))
        .expect("parse");
        let view = c.filter(&p);
        assert_eq!(view.total, 7);
        assert_eq!(view.matched(), 1);
        assert_eq!(view.rows[0].date, "2025-04-18");
    }

    #[test]
    fn check_out_toggle_does_not_require_check_in() {
        let mut c = RecordCollection::seeded(seed::check_ins()).expect("seed");
        let target = c
            .records()
            .iter()
            .find(|r| !r.checked_in)
            .map(|r| r.id.clone())
            .expect("a student not yet on board");
        let updated = c
            .toggle(&target, "checkedOut")
            .expect("toggle")
            .cloned()
            .expect("record");
        assert!(updated.checked_out);
        assert!(!updated.checked_in);
    }

    #[test]
    fn notification_channel_is_editable_but_title_is_not() {
        let mut c = RecordCollection::seeded(seed::notification_settings()).expect("seed");
        let id = c.records()[0].id.clone();
        let updated = c
            .set_category(&id, "channel", "sms")
            .expect("set channel")
            .cloned()
            .expect("record");
        assert_eq!(updated.channel, "sms");
        assert!(c.set_category(&id, "category", "safety").is_err());
    }

    #[test]
    fn every_seed_has_unique_ids() {
        assert!(RecordCollection::seeded(seed::check_ins()).is_ok());
        assert!(RecordCollection::seeded(seed::trip_logs()).is_ok());
        assert!(RecordCollection::seeded(seed::notification_settings()).is_ok());
        assert!(RecordCollection::seeded(seed::student_roster()).is_ok());
        assert!(RecordCollection::seeded(seed::route_stops()).is_ok());
    }
}
