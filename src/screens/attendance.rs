use chrono::NaiveDate;
use std::{collections::BTreeSet, fmt::Write};

use super::{Rendered, ScreenQuery, display_date, parse_ids, query_string};
use crate::{
    fixtures::{self, INTERNS, InternRecord},
    html::escape,
    models::Role,
};

/// AttendanceSheet
///
/// One day's present/absent marks for the fixture roster. Ids outside the
/// roster are never recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceSheet {
    present: BTreeSet<u32>,
}

impl AttendanceSheet {
    /// The marks shown before anyone edits the sheet.
    pub fn from_fixture() -> Self {
        Self {
            present: INTERNS
                .iter()
                .filter(|intern| intern.present_today)
                .map(|intern| intern.id)
                .collect(),
        }
    }

    /// Restores a sheet from its encoded form. `None` means untouched; an
    /// empty string means nobody is present.
    pub fn from_marks(raw: Option<&str>) -> Self {
        match raw {
            None => Self::from_fixture(),
            Some(raw) => Self {
                present: parse_ids(raw).filter(|id| on_roster(*id)).collect(),
            },
        }
    }

    pub fn is_present(&self, id: u32) -> bool {
        self.present.contains(&id)
    }

    /// Flips one intern's mark. Unknown ids are ignored.
    pub fn toggle(&mut self, id: u32) {
        if !on_roster(id) {
            return;
        }
        if !self.present.remove(&id) {
            self.present.insert(id);
        }
    }

    pub fn toggled(&self, id: u32) -> Self {
        let mut next = self.clone();
        next.toggle(id);
        next
    }

    pub fn total(&self) -> usize {
        INTERNS.len()
    }

    pub fn present_count(&self) -> usize {
        self.present.len()
    }

    pub fn absent_count(&self) -> usize {
        self.total() - self.present_count()
    }

    /// Present share of the roster as a rounded percentage.
    pub fn rate(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        (self.present_count() as f64 / self.total() as f64 * 100.0).round() as u32
    }

    pub fn encode(&self) -> String {
        self.present
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn on_roster(id: u32) -> bool {
    INTERNS.iter().any(|intern| intern.id == id)
}

/// filter_roster
///
/// Interns whose name or email contains `search`, ignoring case. An empty
/// search keeps everyone.
pub fn filter_roster(search: &str) -> Vec<&'static InternRecord> {
    let needle = search.trim().to_lowercase();
    INTERNS
        .iter()
        .filter(|intern| {
            needle.is_empty()
                || intern.name.to_lowercase().contains(&needle)
                || intern.email.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn render(role: Role, query: &ScreenQuery, today: NaiveDate) -> Rendered {
    let body = match role {
        Role::Administrator => admin(query, today),
        Role::Intern => intern(),
    };
    Rendered::ok("Attendance", body)
}

fn admin(query: &ScreenQuery, today: NaiveDate) -> String {
    let sheet = AttendanceSheet::from_marks(query.marks.as_deref());
    let search = query.q.as_deref().unwrap_or_default();
    let day = query
        .date
        .as_deref()
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .unwrap_or(today);
    let day_param = day.format("%Y-%m-%d").to_string();

    let mut rows = String::new();
    for intern in filter_roster(search) {
        let present = sheet.is_present(intern.id);
        let link = query_string(&[
            ("date", day_param.clone()),
            ("q", search.to_string()),
            ("marks", sheet.toggled(intern.id).encode()),
        ]);
        let _ = write!(
            rows,
            "<li class=\"card{class}\"><a href=\"/attendance{link}\">\
             <strong>{name}</strong> <small>{email}</small></a> \
             <span class=\"badge\">{status}</span> <small>{average}% avg</small></li>",
            class = if present { " present" } else { "" },
            name = escape(intern.name),
            email = escape(intern.email),
            status = if present { "present" } else { "absent" },
            average = intern.average,
        );
    }

    format!(
        "<h1>Attendance Management</h1><p>Track and manage intern attendance records</p>\
         <div class=\"grid stats\">\
         <div class=\"card\"><p>Total Interns</p><strong>{total}</strong></div>\
         <div class=\"card\"><p>Present Today</p><strong>{present}</strong></div>\
         <div class=\"card\"><p>Absent Today</p><strong>{absent}</strong></div>\
         <div class=\"card\"><p>Attendance Rate</p><strong>{rate}%</strong></div></div>\
         <section class=\"card\"><h2>Mark Attendance - {day}</h2>\
         <p>Click on intern names to mark their attendance for today</p>\
         <form method=\"get\" action=\"/attendance\">\
         <input type=\"date\" name=\"date\" value=\"{day_param}\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search interns...\" value=\"{search}\">\
         <input type=\"hidden\" name=\"marks\" value=\"{marks}\">\
         <button type=\"submit\">Apply</button></form>\
         <ul class=\"roster\">{rows}</ul></section>",
        total = sheet.total(),
        present = sheet.present_count(),
        absent = sheet.absent_count(),
        rate = sheet.rate(),
        day = display_date(day),
        search = escape(search),
        marks = sheet.encode(),
    )
}

fn intern() -> String {
    let summary = fixtures::INTERN_ATTENDANCE;

    let mut history = String::new();
    for record in fixtures::attendance_history() {
        let status = if record.present { "Present" } else { "Absent" };
        let _ = write!(
            history,
            "<li class=\"card\"><strong>{}</strong> <small>{}</small> <span class=\"badge\">{status}</span></li>",
            display_date(record.date),
            record.date.format("%A"),
        );
    }

    format!(
        "<h1>My Attendance</h1><p>Track your attendance record and statistics</p>\
         <div class=\"grid stats\">\
         <div class=\"card\"><h3>Overall Rate</h3><strong>{rate}%</strong><p>This month</p></div>\
         <div class=\"card\"><h3>Days Present</h3><strong>{present}</strong><p>Out of {total} days</p></div>\
         <div class=\"card\"><h3>Days Absent</h3><strong>{absent}</strong><p>This month</p></div></div>\
         <section class=\"card\"><h2>Recent Attendance</h2><p>Your attendance record for the past week</p>\
         <ul>{history}</ul></section>",
        rate = summary.rate,
        present = summary.days_present,
        total = summary.days_total,
        absent = summary.days_absent,
    )
}
