use chrono::NaiveDate;
use serde::Deserialize;
use std::fmt::Write;

use super::{Rendered, display_date};
use crate::{
    errors::AppError,
    fixtures::{self, SyllabusWeek, WeekStatus},
    html::escape,
    models::Role,
};

/// SyllabusDraft
///
/// Form body of `POST /syllabus`. Fields arrive as raw strings and are
/// validated into a [`SyllabusWeek`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyllabusDraft {
    #[serde(default)]
    pub week: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl SyllabusDraft {
    /// into_week
    ///
    /// Week must be a positive integer and the title non-empty. The new entry
    /// takes the next free id, starts as upcoming and is stamped with `today`.
    pub fn into_week(
        self,
        existing: &[SyllabusWeek],
        today: NaiveDate,
    ) -> Result<SyllabusWeek, AppError> {
        let week = match self.week.trim().parse::<u32>() {
            Ok(week) if week > 0 => week,
            _ => {
                return Err(AppError::Validation(
                    "Week number must be a positive whole number.".to_string(),
                ));
            }
        };

        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("Title is required.".to_string()));
        }

        let id = existing.iter().map(|item| item.id).max().unwrap_or(0) + 1;

        Ok(SyllabusWeek {
            id,
            week,
            title: title.to_string(),
            description: self.description.trim().to_string(),
            resources: vec![],
            status: WeekStatus::Upcoming,
            upload_date: Some(today),
        })
    }
}

pub fn render(role: Role) -> Rendered {
    let items = fixtures::syllabus();
    let body = match role {
        Role::Administrator => admin(&items, None),
        Role::Intern => intern(&items),
    };
    Rendered::ok("Syllabus", body)
}

/// Admin view over an explicit item list, with an optional flash line
/// (`Ok` for a confirmation, `Err` for a rejected draft).
pub fn admin(items: &[SyllabusWeek], flash: Option<Result<&str, &str>>) -> String {
    let flash = match flash {
        Some(Ok(message)) => format!("<p class=\"notice\">{}</p>", escape(message)),
        Some(Err(message)) => format!("<p class=\"error\" role=\"alert\">{}</p>", escape(message)),
        None => String::new(),
    };

    format!(
        "<h1>Syllabus Management</h1><p>Upload and manage weekly syllabus content</p>{flash}\
         <section class=\"card\"><h2>Add Syllabus</h2>\
         <p>Add a new weekly or monthly syllabus with resources</p>\
         <form method=\"post\" action=\"/syllabus\">\
         <label>Week Number <input type=\"number\" name=\"week\" min=\"1\" placeholder=\"e.g., 4\"></label>\
         <label>Title <input type=\"text\" name=\"title\" placeholder=\"e.g., Advanced React Patterns\"></label>\
         <label>Description <textarea name=\"description\" \
         placeholder=\"Describe the learning objectives and topics covered...\"></textarea></label>\
         <button type=\"submit\">Add Syllabus</button></form></section>{list}",
        list = week_list(items, true),
    )
}

fn intern(items: &[SyllabusWeek]) -> String {
    format!(
        "<h1>Learning Syllabus</h1><p>Your weekly learning materials and resources</p>{}",
        week_list(items, false)
    )
}

fn week_list(items: &[SyllabusWeek], show_upload_date: bool) -> String {
    let mut out = String::from("<ul class=\"syllabus\">");
    for item in items {
        let uploaded = match (show_upload_date, item.upload_date) {
            (true, Some(date)) => format!(" <small>Uploaded {}</small>", display_date(date)),
            _ => String::new(),
        };

        let resources = if item.resources.is_empty() {
            "<p>No resources uploaded yet</p>".to_string()
        } else {
            let mut list = String::from("<ul>");
            for resource in &item.resources {
                let _ = write!(
                    list,
                    "<li><a href=\"{}\">{}</a> <span class=\"badge\">{}</span></li>",
                    escape(&resource.url),
                    escape(&resource.name),
                    resource.kind.as_str()
                );
            }
            list.push_str("</ul>");
            list
        };

        let class = if item.status == WeekStatus::Current { " current" } else { "" };
        let _ = write!(
            out,
            "<li class=\"card{class}\"><h3>Week {}: {}</h3> <span class=\"badge\">{}</span>{uploaded}\
             <p>{}</p>{resources}</li>",
            item.week,
            escape(&item.title),
            item.status.as_str(),
            escape(&item.description),
        );
    }
    out.push_str("</ul>");
    out
}
