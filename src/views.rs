use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

/// View
///
/// The content screens reachable once a session is authenticated, plus the
/// catch-all NotFound view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum View {
    Dashboard,
    Syllabus,
    Attendance,
    Roadmap,
    Tools,
    NotFound,
}

impl View {
    /// The navigable screens, in navigation-bar order.
    pub const NAVIGATION: [View; 5] = [
        View::Dashboard,
        View::Syllabus,
        View::Attendance,
        View::Roadmap,
        View::Tools,
    ];

    /// resolve
    ///
    /// Maps a request path to exactly one view. Matching ignores ASCII case and
    /// a single trailing slash; any query string must already be stripped.
    /// A doubled leading slash never names a view.
    pub fn resolve(path: &str) -> View {
        if path.starts_with("//") {
            return View::NotFound;
        }
        let trimmed = match path.strip_suffix('/') {
            Some(rest) if !rest.is_empty() => rest,
            _ => path,
        };

        Self::NAVIGATION
            .into_iter()
            .find(|view| view.path().eq_ignore_ascii_case(trimmed))
            .unwrap_or(View::NotFound)
    }

    /// Canonical path of the view. NotFound has no path of its own.
    pub const fn path(self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Syllabus => "/syllabus",
            View::Attendance => "/attendance",
            View::Roadmap => "/roadmap",
            View::Tools => "/tools",
            View::NotFound => "/",
        }
    }

    /// Label used in the navigation bar and page titles.
    pub const fn title(self) -> &'static str {
        match self {
            View::Dashboard => "Home",
            View::Syllabus => "Syllabus",
            View::Attendance => "Attendance",
            View::Roadmap => "Roadmap",
            View::Tools => "Tools",
            View::NotFound => "Page Not Found",
        }
    }
}
