/// Content Screens
///
/// Each screen renders fixture data through one of two fixed sub-views chosen
/// by an exhaustive match on the identity's role. Screens are stateless: any
/// working state (filters, toggled marks, bookmarks, an expanded card) arrives
/// in the [`ScreenQuery`] of the current request and is never written back to
/// the session.
pub mod attendance;
pub mod dashboard;
pub mod roadmap;
pub mod syllabus;
pub mod tools;

use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{html::encode_query, models::Identity, views::View};

/// ScreenQuery
///
/// Optional query parameters a screen may read. Unused fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenQuery {
    /// Free-text search (attendance roster, tools).
    pub q: Option<String>,
    /// Tools category filter.
    pub category: Option<String>,
    /// Comma-separated ids of interns marked present.
    pub marks: Option<String>,
    /// Comma-separated ids of bookmarked tools.
    pub bookmarks: Option<String>,
    /// Roadmap whose steps are shown.
    pub expand: Option<u32>,
    /// Attendance day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Rendered
///
/// A screen body ready to be placed inside the application shell.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub status: StatusCode,
    pub title: &'static str,
    pub body: String,
}

impl Rendered {
    pub fn ok(title: &'static str, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            title,
            body,
        }
    }
}

/// render
///
/// Dispatches a resolved view to its screen. `today` anchors date-dependent
/// screens so rendering stays a pure function of its inputs.
pub fn render(view: View, identity: &Identity, query: &ScreenQuery, today: NaiveDate) -> Rendered {
    match view {
        View::Dashboard => dashboard::render(identity),
        View::Syllabus => syllabus::render(identity.role),
        View::Attendance => attendance::render(identity.role, query, today),
        View::Roadmap => roadmap::render(identity.role, query),
        View::Tools => tools::render(identity.role, query),
        View::NotFound => not_found(),
    }
}

/// not_found
///
/// Body for any path the View Router does not know.
pub fn not_found() -> Rendered {
    Rendered {
        status: StatusCode::NOT_FOUND,
        title: View::NotFound.title(),
        body: "<section class=\"card\"><h1>404</h1><h2>Page Not Found</h2>\
               <p>The page you're looking for doesn't exist.</p>\
               <a href=\"/\">Return to Dashboard</a></section>"
            .to_string(),
    }
}

/// Builds `?k=v&...` from the given pairs. Values are encoded; pairs are kept
/// even when the value is empty, since an empty list is meaningful.
pub(crate) fn query_string(pairs: &[(&str, String)]) -> String {
    let joined: Vec<String> = pairs
        .iter()
        .map(|(key, value)| format!("{key}={}", encode_query(value)))
        .collect();
    if joined.is_empty() {
        String::new()
    } else {
        format!("?{}", joined.join("&amp;"))
    }
}

/// Parses a comma-separated id list, skipping anything that is not a number.
pub(crate) fn parse_ids(raw: &str) -> impl Iterator<Item = u32> + '_ {
    raw.split(',').filter_map(|part| part.trim().parse().ok())
}

/// Formats a date the way the portal displays it, e.g. `2/15/2024`.
pub(crate) fn display_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
