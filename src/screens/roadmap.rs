use std::fmt::Write;

use super::{Rendered, ScreenQuery, query_string};
use crate::{
    fixtures::{self, Roadmap},
    html::escape,
    models::Role,
};

pub fn completed_steps(roadmap: &Roadmap) -> usize {
    roadmap.steps.iter().filter(|step| step.completed).count()
}

/// Rounded completion percentage of one roadmap.
pub fn progress(roadmap: &Roadmap) -> u32 {
    if roadmap.steps.is_empty() {
        return 0;
    }
    (completed_steps(roadmap) as f64 / roadmap.steps.len() as f64 * 100.0).round() as u32
}

/// overall_progress
///
/// Mean of the per-roadmap completion ratios, as a rounded percentage. Every
/// roadmap weighs the same regardless of its length.
pub fn overall_progress(roadmaps: &[Roadmap]) -> u32 {
    if roadmaps.is_empty() {
        return 0;
    }
    let sum: f64 = roadmaps
        .iter()
        .filter(|roadmap| !roadmap.steps.is_empty())
        .map(|roadmap| completed_steps(roadmap) as f64 / roadmap.steps.len() as f64)
        .sum();
    (sum / roadmaps.len() as f64 * 100.0).round() as u32
}

pub fn render(role: Role, query: &ScreenQuery) -> Rendered {
    let roadmaps = fixtures::roadmaps();
    let body = match role {
        Role::Administrator => admin(&roadmaps, query.expand),
        Role::Intern => intern(&roadmaps, query.expand),
    };
    Rendered::ok("Roadmap", body)
}

fn admin(roadmaps: &[Roadmap], expand: Option<u32>) -> String {
    let mut rows = String::new();
    for roadmap in roadmaps {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}%</td></tr>",
            escape(roadmap.title),
            roadmap.difficulty.as_str(),
            escape(roadmap.estimated_time),
            roadmap.steps.len(),
            progress(roadmap)
        );
    }

    let cards: String = roadmaps
        .iter()
        .map(|roadmap| card(roadmap, expand == Some(roadmap.id)))
        .collect();

    format!(
        "<h1>Roadmap Overview</h1><p>Learning paths offered to the current cohort</p>\
         <section class=\"card\"><table><thead><tr><th>Roadmap</th><th>Difficulty</th>\
         <th>Duration</th><th>Steps</th><th>Cohort Progress</th></tr></thead>\
         <tbody>{rows}</tbody></table></section><div class=\"grid\">{cards}</div>"
    )
}

fn intern(roadmaps: &[Roadmap], expand: Option<u32>) -> String {
    let completed: usize = roadmaps.iter().map(completed_steps).sum();
    let total: usize = roadmaps.iter().map(|roadmap| roadmap.steps.len()).sum();

    let cards: String = roadmaps
        .iter()
        .map(|roadmap| card(roadmap, expand == Some(roadmap.id)))
        .collect();

    let mut achievements = String::new();
    for achievement in &fixtures::ACHIEVEMENTS {
        let _ = write!(
            achievements,
            "<li><strong>{}</strong><br><small>{}</small></li>",
            escape(achievement.title),
            escape(achievement.detail)
        );
    }

    format!(
        "<h1>Learning Roadmaps</h1><p>Structured learning paths to guide your development journey</p>\
         <section class=\"card\"><h2>Overall Learning Progress</h2>\
         <p class=\"overall\"><strong>{overall}%</strong></p>\
         <div class=\"grid stats\"><div><strong>{completed}</strong><p>Steps Completed</p></div>\
         <div><strong>{total}</strong><p>Total Steps</p></div>\
         <div><strong>{count}</strong><p>Active Roadmaps</p></div></div></section>\
         <div class=\"grid\">{cards}</div>\
         <section class=\"card\"><h2>Recent Achievements</h2><ul>{achievements}</ul></section>",
        overall = overall_progress(roadmaps),
        count = roadmaps.len(),
    )
}

fn card(roadmap: &Roadmap, expanded: bool) -> String {
    let toggle = if expanded {
        "<a href=\"/roadmap\">Hide Steps</a>".to_string()
    } else {
        format!(
            "<a href=\"/roadmap{}\">View Learning Path</a>",
            query_string(&[("expand", roadmap.id.to_string())])
        )
    };

    let steps = if expanded {
        let mut list = String::from("<ol class=\"steps\">");
        for step in &roadmap.steps {
            let class = if step.current {
                " class=\"current\""
            } else if step.completed {
                " class=\"completed\""
            } else {
                ""
            };
            let marker = if step.current { " <span class=\"badge\">Current</span>" } else { "" };
            let _ = write!(
                list,
                "<li{class}>{} <small>{} resources</small>{marker}</li>",
                escape(step.title),
                step.resources
            );
        }
        list.push_str("</ol>");
        list
    } else {
        String::new()
    };

    format!(
        "<section class=\"card roadmap\" id=\"roadmap-{id}\"><h3>{title}</h3><p>{description}</p>\
         <span class=\"badge\">{difficulty}</span> <small>{time}</small> \
         <p>{done}/{total} steps · {progress}% complete</p>{toggle}{steps}</section>",
        id = roadmap.id,
        title = escape(roadmap.title),
        description = escape(roadmap.description),
        difficulty = roadmap.difficulty.as_str(),
        time = escape(roadmap.estimated_time),
        done = completed_steps(roadmap),
        total = roadmap.steps.len(),
        progress = progress(roadmap),
    )
}
