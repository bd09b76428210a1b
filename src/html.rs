//! Page chrome shared by every screen: the document wrapper, the gate pages
//! (role selection, login) and the authenticated application shell.

use std::fmt::Write;

use crate::{
    auth::DEMO_PASSWORD,
    models::{Identity, Role},
    views::View,
};

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f8fafc;color:#0f172a}\
main{max-width:72rem;margin:0 auto;padding:1.5rem}\
nav{display:flex;gap:.5rem;align-items:center;padding:.75rem 1.5rem;background:#fff;border-bottom:1px solid #e2e8f0}\
nav a{padding:.4rem .75rem;border-radius:.5rem;text-decoration:none;color:#475569}\
nav a.active{background:#2563eb;color:#fff}\
.card{background:#fff;border:1px solid #e2e8f0;border-radius:.75rem;padding:1rem;margin:.75rem 0}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(14rem,1fr));gap:1rem}\
.badge{display:inline-block;padding:.1rem .5rem;border-radius:1rem;background:#e2e8f0;font-size:.8rem}\
.error{color:#b91c1c}.present{background:#dcfce7}.current{border-color:#2563eb}";

/// document
///
/// Wraps a body fragment into a complete HTML page.
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} · Intern Management System</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

/// Encodes a value for a query string component.
pub fn encode_query(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => {
                let _ = write!(out, "%{other:02X}");
            }
        }
    }
    out
}

fn hidden_next(next: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"next\" value=\"{}\">",
        escape(next)
    )
}

// --- Gate Pages ---

fn role_pitch(role: Role) -> (&'static str, [&'static str; 4]) {
    match role {
        Role::Administrator => (
            "Full access to manage interns, attendance, content, and system settings",
            [
                "Upload and manage syllabus content",
                "Track attendance for all interns",
                "Send notifications and updates",
                "Manage learning resources and tools",
            ],
        ),
        Role::Intern => (
            "Access your learning materials, track progress, and stay updated with announcements",
            [
                "View syllabus and learning resources",
                "Check personal attendance record",
                "Follow structured learning roadmaps",
                "Access development tools and resources",
            ],
        ),
    }
}

/// role_selection
///
/// The `NoRole` gate page: one card per role, each posting the choice.
/// `next` is the path the visitor originally asked for.
pub fn role_selection(next: &str) -> String {
    let mut cards = String::new();
    for role in Role::ALL {
        let (pitch, features) = role_pitch(role);
        let items: String = features
            .iter()
            .map(|feature| format!("<li>{feature}</li>"))
            .collect();
        let _ = write!(
            cards,
            "<form class=\"card\" method=\"post\" action=\"/session/role\">\
             <h2>{label}</h2><p>{pitch}</p>\
             <input type=\"hidden\" name=\"role\" value=\"{value}\">{next}\
             <button type=\"submit\">Continue as {label}</button><ul>{items}</ul></form>",
            label = role.label(),
            value = role.as_str(),
            next = hidden_next(next),
        );
    }

    document(
        "Choose your role",
        &format!(
            "<main><h1>Intern Management System</h1>\
             <p>A comprehensive platform for managing interns, tracking progress, and facilitating learning</p>\
             <div class=\"grid\">{cards}</div></main>"
        ),
    )
}

fn login_copy(role: Role) -> (&'static str, &'static str) {
    match role {
        Role::Administrator => (
            "Administrator Login",
            "Access the admin dashboard to manage the system",
        ),
        Role::Intern => ("Intern Login", "Access your learning materials and progress"),
    }
}

/// login
///
/// The `RoleChosen` gate page. The demo hint is rendered from the same role
/// string the credential check compares against.
pub fn login(role: Role, next: &str, error: Option<&str>) -> String {
    let (title, description) = login_copy(role);
    let error = error
        .map(|message| format!("<p class=\"error\" role=\"alert\">{}</p>", escape(message)))
        .unwrap_or_default();

    document(
        title,
        &format!(
            "<main><div class=\"card\">\
             <form method=\"post\" action=\"/session/back\">{back_next}<button type=\"submit\">&larr; Back</button></form>\
             <h1>{title}</h1><p>{description}</p>{error}\
             <form method=\"post\" action=\"/session/login\">{next}\
             <label for=\"username\">Username</label>\
             <input id=\"username\" name=\"username\" type=\"text\" required placeholder=\"Enter your {role} username\">\
             <label for=\"password\">Password</label>\
             <input id=\"password\" name=\"password\" type=\"password\" required placeholder=\"Enter your password\">\
             <button type=\"submit\">Sign In</button></form>\
             <p><strong>Demo credentials:</strong><br>Username: {role} | Password: {DEMO_PASSWORD}</p>\
             </div></main>",
            back_next = hidden_next(next),
            next = hidden_next(next),
            role = role.as_str(),
        ),
    )
}

// --- Application Shell ---

/// shell
///
/// Navigation bar plus the screen body, for an authenticated identity.
/// `active` is `None` on the NotFound page.
pub fn shell(identity: &Identity, active: Option<View>, title: &str, body: &str) -> String {
    let brand = match identity.role {
        Role::Administrator => "IMS Admin",
        Role::Intern => "IMS Portal",
    };

    let mut links = String::new();
    for view in View::NAVIGATION {
        let class = if Some(view) == active { " class=\"active\"" } else { "" };
        let _ = write!(
            links,
            "<a href=\"{}\"{class}>{}</a>",
            view.path(),
            view.title()
        );
    }

    document(
        title,
        &format!(
            "<nav><strong>{brand}</strong>{links}\
             <span><span class=\"user-name\">{name}</span> <small>{role}</small></span>\
             <form method=\"post\" action=\"/session/logout\"><button type=\"submit\">Logout</button></form>\
             </nav>\n<main>{body}</main>",
            name = escape(&identity.name),
            role = identity.role.label(),
        ),
    )
}
