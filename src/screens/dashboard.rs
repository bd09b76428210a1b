use std::fmt::Write;

use super::{Rendered, display_date};
use crate::{
    fixtures::{self, NoticeKind, StatCard},
    html::escape,
    models::{Identity, Role},
};

pub fn render(identity: &Identity) -> Rendered {
    let body = match identity.role {
        Role::Administrator => admin(),
        Role::Intern => intern(&identity.name),
    };
    Rendered::ok("Dashboard", body)
}

fn stat_cards(cards: &[StatCard]) -> String {
    let mut out = String::from("<div class=\"grid stats\">");
    for card in cards {
        let _ = write!(
            out,
            "<div class=\"card\"><p>{}</p><p><strong>{}</strong></p><small>{}</small></div>",
            escape(card.title),
            escape(card.value),
            escape(card.caption)
        );
    }
    out.push_str("</div>");
    out
}

fn admin() -> String {
    let mut activity = String::new();
    for item in &fixtures::RECENT_ACTIVITY {
        let _ = write!(
            activity,
            "<li>{}<br><small>{}</small></li>",
            escape(item.text),
            escape(item.time)
        );
    }

    format!(
        "{stats}<div class=\"grid\">\
         <section class=\"card\"><h2>Quick Actions</h2><p>Manage system components</p><ul>\
         <li><a href=\"/syllabus\">Upload New Syllabus</a></li>\
         <li><a href=\"/attendance\">Mark Attendance</a></li>\
         <li><button type=\"button\" disabled>Send Notification</button></li>\
         <li><a href=\"/attendance\">Manage Interns</a></li></ul></section>\
         <section class=\"card\"><h2>Recent Activity</h2><p>Latest system updates</p><ul>{activity}</ul></section>\
         </div>",
        stats = stat_cards(&fixtures::ADMIN_STATS),
    )
}

fn intern(name: &str) -> String {
    let mut notices = String::new();
    for notice in &fixtures::NOTIFICATIONS {
        let tone = match notice.kind {
            NoticeKind::Urgent => "error",
            NoticeKind::Warning => "warning",
            NoticeKind::Info => "info",
        };
        let _ = write!(
            notices,
            "<li class=\"card {tone}\"><h4>{}</h4><p>{}</p><small>{}</small> \
             <span class=\"badge\">{}</span></li>",
            escape(notice.title),
            escape(notice.message),
            escape(notice.time),
            notice.kind.as_str()
        );
    }

    let mut dates = String::new();
    for date in fixtures::important_dates() {
        let _ = write!(
            dates,
            "<li class=\"card\"><h4>{}</h4><p>{}</p><span class=\"badge\">{}</span></li>",
            escape(date.title),
            display_date(date.date),
            escape(date.kind)
        );
    }

    format!(
        "<h1>Welcome Back, {name}!</h1><p>Stay updated with your learning journey</p>\
         <div class=\"grid\">\
         <section><h2>Latest Updates</h2><p>Important announcements and notifications</p><ul>{notices}</ul></section>\
         <section><h2>Important Dates</h2><p>Upcoming deadlines and events</p><ul>{dates}</ul></section>\
         </div>{stats}",
        name = escape(name),
        stats = stat_cards(&fixtures::INTERN_QUICK_STATS),
    )
}
