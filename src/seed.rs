// Literal data each view starts from when it mounts.

use crate::domain::{CheckIn, NotificationSetting, RouteStop, StudentProfile, TripLog};

fn check_in(
    id: &str,
    name: &str,
    grade: &str,
    stop: &str,
    route: &str,
    pickup_time: &str,
    checked_in: bool,
) -> CheckIn {
    CheckIn {
        id: id.to_string(),
        name: name.to_string(),
        grade: grade.to_string(),
        stop: stop.to_string(),
        route: route.to_string(),
        pickup_time: pickup_time.to_string(),
        checked_in,
        checked_out: false,
    }
}

#[rustfmt::skip]
pub fn check_ins() -> Vec<CheckIn> {
    vec![
        check_in("1", "Emma Johnson", "3", "Maple St & 5th Ave", "Morning Route #103", "7:15 AM", true),
        check_in("2", "Alex Thompson", "5", "Oak Park Entrance", "Morning Route #103", "7:22 AM", true),
        check_in("3", "Sophia Martinez", "4", "Riverside Dr", "Morning Route #105", "7:18 AM", false),
        check_in("4", "Liam Wilson", "2", "Pine Hill Rd", "Morning Route #103", "7:30 AM", false),
        check_in("5", "Olivia Davis", "5", "Cedar Ln & Birch Ct", "Morning Route #105", "7:35 AM", true),
        check_in("6", "Noah Garcia", "1", "Lakeview Blvd", "Afternoon Route #201", "3:10 PM", false),
        check_in("7", "Ava Brown", "3", "Elm St Library", "Morning Route #103", "7:41 AM", false),
    ]
}

#[allow(clippy::too_many_arguments)]
fn trip(
    id: &str,
    date: &str,
    student: &str,
    route: &str,
    pickup: &str,
    dropoff: &str,
    times: (&str, &str),
    driver: &str,
    status: &str,
) -> TripLog {
    TripLog {
        id: id.to_string(),
        date: date.to_string(),
        student: student.to_string(),
        route: route.to_string(),
        pickup: pickup.to_string(),
        dropoff: dropoff.to_string(),
        pickup_time: times.0.to_string(),
        dropoff_time: times.1.to_string(),
        driver: driver.to_string(),
        status: status.to_string(),
    }
}

#[rustfmt::skip]
pub fn trip_logs() -> Vec<TripLog> {
    vec![
        trip("T-1001", "2025-04-14", "Emma Johnson", "Morning Route #103", "Maple St & 5th Ave", "Lincoln Elementary", ("7:15 AM", "7:52 AM"), "Robert Miller", "completed"),
        trip("T-1002", "2025-04-15", "Emma Johnson", "Morning Route #103", "Maple St & 5th Ave", "Lincoln Elementary", ("7:17 AM", "7:55 AM"), "Robert Miller", "completed"),
        trip("T-1003", "2025-04-16", "Alex Thompson", "Morning Route #103", "Oak Park Entrance", "Lincoln Elementary", ("7:29 AM", "8:06 AM"), "Robert Miller", "delayed"),
        trip("T-1004", "2025-04-17", "Sophia Martinez", "Morning Route #105", "Riverside Dr", "Lincoln Elementary", ("7:18 AM", "7:49 AM"), "Dana Brooks", "completed"),
        trip("T-1005", "2025-04-18", "Emma Johnson", "Afternoon Route #201", "Lincoln Elementary", "Maple St & 5th Ave", ("3:05 PM", "3:41 PM"), "Dana Brooks", "completed"),
        trip("T-1006", "2025-04-21", "Liam Wilson", "Morning Route #103", "Pine Hill Rd", "Lincoln Elementary", ("", ""), "Robert Miller", "cancelled"),
        trip("T-1007", "2025-04-22", "Olivia Davis", "Morning Route #105", "Cedar Ln & Birch Ct", "Lincoln Elementary", ("7:36 AM", "8:01 AM"), "Dana Brooks", "completed"),
    ]
}

fn notification(
    id: &str,
    title: &str,
    description: &str,
    category: &str,
    channel: &str,
    enabled: bool,
) -> NotificationSetting {
    NotificationSetting {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        channel: channel.to_string(),
        enabled,
    }
}

#[rustfmt::skip]
pub fn notification_settings() -> Vec<NotificationSetting> {
    vec![
        notification("bus-approaching", "Bus approaching", "When the bus is 5 minutes from the stop", "trip", "push", true),
        notification("student-boarded", "Student boarded", "When your student checks in on the bus", "trip", "push", true),
        notification("student-dropped", "Student dropped off", "When your student checks out at school or home", "trip", "push", true),
        notification("route-delay", "Route delays", "Delays of more than 10 minutes on your route", "schedule", "sms", true),
        notification("schedule-change", "Schedule changes", "Early dismissals and route changes", "schedule", "email", false),
        notification("safety-alert", "Safety alerts", "Weather closures and emergency notices", "safety", "sms", true),
        notification("weekly-summary", "Weekly summary", "A recap of the week's trips every Friday", "account", "email", false),
    ]
}

fn profile(
    id: &str,
    name: &str,
    grade: &str,
    guardian: &str,
    address: &str,
    route: &str,
    status: &str,
) -> StudentProfile {
    StudentProfile {
        id: id.to_string(),
        name: name.to_string(),
        grade: grade.to_string(),
        guardian: guardian.to_string(),
        address: address.to_string(),
        route: route.to_string(),
        status: status.to_string(),
    }
}

#[rustfmt::skip]
pub fn student_roster() -> Vec<StudentProfile> {
    vec![
        profile("S-01", "Emma Johnson", "3", "Karen Johnson", "14 Maple St", "Morning Route #103", "active"),
        profile("S-02", "Alex Thompson", "5", "Mark Thompson", "220 Oak Park Dr", "Morning Route #103", "active"),
        profile("S-03", "Sophia Martinez", "4", "Lucia Martinez", "9 Riverside Dr", "Morning Route #105", "active"),
        profile("S-04", "Liam Wilson", "2", "Grace Wilson", "61 Pine Hill Rd", "Morning Route #103", "active"),
        profile("S-05", "Olivia Davis", "5", "Henry Davis", "3 Birch Ct", "Morning Route #105", "active"),
        profile("S-06", "Noah Garcia", "1", "Elena Garcia", "180 Lakeview Blvd", "Afternoon Route #201", "inactive"),
    ]
}

fn stop(
    id: &str,
    route: &str,
    name: &str,
    address: &str,
    scheduled_time: &str,
    students: u32,
) -> RouteStop {
    RouteStop {
        id: id.to_string(),
        route: route.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        scheduled_time: scheduled_time.to_string(),
        students,
        completed: false,
    }
}

#[rustfmt::skip]
pub fn route_stops() -> Vec<RouteStop> {
    vec![
        stop("103-1", "Morning Route #103", "Maple St & 5th Ave", "5th Ave at Maple St", "7:15 AM", 1),
        stop("103-2", "Morning Route #103", "Oak Park Entrance", "220 Oak Park Dr", "7:22 AM", 1),
        stop("103-3", "Morning Route #103", "Pine Hill Rd", "61 Pine Hill Rd", "7:30 AM", 1),
        stop("103-4", "Morning Route #103", "Elm St Library", "400 Elm St", "7:41 AM", 1),
        stop("103-5", "Morning Route #103", "Lincoln Elementary", "1200 School Rd", "7:55 AM", 0),
        stop("105-1", "Morning Route #105", "Riverside Dr", "9 Riverside Dr", "7:18 AM", 1),
        stop("105-2", "Morning Route #105", "Cedar Ln & Birch Ct", "Cedar Ln at Birch Ct", "7:35 AM", 1),
    ]
}
