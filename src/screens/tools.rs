use serde::Deserialize;
use std::{collections::BTreeSet, fmt::Write};

use super::{Rendered, ScreenQuery, parse_ids, query_string};
use crate::{
    errors::AppError,
    fixtures::{self, DEFAULT_BOOKMARKS, TOOL_CATEGORIES, Tool},
    html::escape,
    models::Role,
};

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

const NEW_TOOL_RATING: f32 = 4.5;

/// ToolDraft
///
/// Form body of `POST /tools`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: String,
    /// Comma-separated.
    #[serde(default)]
    pub tags: String,
}

impl ToolDraft {
    /// into_tool
    ///
    /// Name and URL are required. New tools take the next free id, are never
    /// featured and start at the default rating.
    pub fn into_tool(self, catalog: &[Tool]) -> Result<Tool, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Tool name is required.".to_string()));
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(AppError::Validation("Tool URL is required.".to_string()));
        }

        let id = catalog.iter().map(|tool| tool.id).max().unwrap_or(0) + 1;

        Ok(Tool {
            id,
            name: name.to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            url: url.to_string(),
            featured: false,
            rating: NEW_TOOL_RATING,
            tags: split_tags(&self.tags),
        })
    }
}

/// Splits a comma-separated tag list, trimming each tag and dropping empties.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// matches
///
/// Search hits name, description or any tag, ignoring case. The category must
/// match exactly unless it is [`ALL_CATEGORIES`].
pub fn matches(tool: &Tool, search: &str, category: &str) -> bool {
    let needle = search.trim().to_lowercase();
    let matches_search = needle.is_empty()
        || tool.name.to_lowercase().contains(&needle)
        || tool.description.to_lowercase().contains(&needle)
        || tool.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
    let matches_category = category == ALL_CATEGORIES || tool.category == category;
    matches_search && matches_category
}

pub fn filter_tools<'a>(tools: &'a [Tool], search: &str, category: &str) -> Vec<&'a Tool> {
    tools
        .iter()
        .filter(|tool| matches(tool, search, category))
        .collect()
}

/// Bookmarks
///
/// The intern's bookmarked tool ids for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmarks(BTreeSet<u32>);

impl Bookmarks {
    /// `None` means untouched (the default bookmarks); empty means none.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None => Self(DEFAULT_BOOKMARKS.into_iter().collect()),
            Some(raw) => Self(parse_ids(raw).collect()),
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    pub fn toggled(&self, id: u32) -> Self {
        let mut next = self.0.clone();
        if !next.remove(&id) {
            next.insert(id);
        }
        Self(next)
    }

    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub fn render(role: Role, query: &ScreenQuery) -> Rendered {
    let catalog = fixtures::tools();
    let body = match role {
        Role::Administrator => admin(&catalog, None),
        Role::Intern => intern(&catalog, query),
    };
    Rendered::ok("Tools", body)
}

fn tags(tool: &Tool, limit: usize) -> String {
    tool.tags
        .iter()
        .take(limit)
        .map(|tag| format!("<span class=\"badge\">{}</span>", escape(tag)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Admin view over an explicit catalog, with an optional flash line.
pub fn admin(catalog: &[Tool], flash: Option<Result<&str, &str>>) -> String {
    let flash = match flash {
        Some(Ok(message)) => format!("<p class=\"notice\">{}</p>", escape(message)),
        Some(Err(message)) => format!("<p class=\"error\" role=\"alert\">{}</p>", escape(message)),
        None => String::new(),
    };

    let mut cards = String::new();
    for tool in catalog {
        let featured = if tool.featured { " <span class=\"badge\">Featured</span>" } else { "" };
        let _ = write!(
            cards,
            "<li class=\"card tool\"><h3>{name}{featured}</h3><p>{description}</p>\
             <small>{category} · ★ {rating:.1}</small><p>{tags}</p>\
             <a href=\"{url}\" target=\"_blank\" rel=\"noopener\">Visit</a></li>",
            name = escape(&tool.name),
            description = escape(&tool.description),
            category = escape(&tool.category),
            rating = tool.rating,
            tags = tags(tool, 3),
            url = escape(&tool.url),
        );
    }

    format!(
        "<h1>Tools Management</h1><p>Manage development tools and resources for interns</p>{flash}\
         <section class=\"card\"><h2>Add Tool</h2><form method=\"post\" action=\"/tools\">\
         <input type=\"text\" name=\"name\" placeholder=\"Tool Name\">\
         <input type=\"text\" name=\"description\" placeholder=\"Description\">\
         <input type=\"text\" name=\"category\" placeholder=\"Category\">\
         <input type=\"url\" name=\"url\" placeholder=\"URL\">\
         <input type=\"text\" name=\"tags\" placeholder=\"Tags (comma-separated)\">\
         <button type=\"submit\">Add Tool</button></form></section>\
         <ul class=\"grid tools\">{cards}</ul>"
    )
}

fn intern(catalog: &[Tool], query: &ScreenQuery) -> String {
    let search = query.q.as_deref().unwrap_or_default();
    let category = query
        .category
        .as_deref()
        .filter(|category| TOOL_CATEGORIES.contains(category))
        .unwrap_or(ALL_CATEGORIES);
    let bookmarks = Bookmarks::from_param(query.bookmarks.as_deref());

    let link = |category: &str, bookmarks: &Bookmarks| {
        format!(
            "/tools{}",
            query_string(&[
                ("q", search.to_string()),
                ("category", category.to_string()),
                ("bookmarks", bookmarks.encode()),
            ])
        )
    };

    let bookmark_button = |tool: &Tool| {
        let label = if bookmarks.contains(tool.id) { "★ Bookmarked" } else { "☆ Bookmark" };
        format!(
            "<a class=\"bookmark\" href=\"{}\">{label}</a>",
            link(category, &bookmarks.toggled(tool.id))
        )
    };

    let mut category_links = String::new();
    for option in TOOL_CATEGORIES {
        let class = if option == category { " class=\"active\"" } else { "" };
        let _ = write!(
            category_links,
            "<a{class} href=\"{}\">{}</a> ",
            link(option, &bookmarks),
            escape(option)
        );
    }

    let mut featured = String::new();
    for tool in catalog.iter().filter(|tool| tool.featured) {
        let _ = write!(
            featured,
            "<li class=\"card tool\"><h3>{}</h3><p>{}</p><p>{}</p>{}</li>",
            escape(&tool.name),
            escape(&tool.description),
            tags(tool, 2),
            bookmark_button(tool)
        );
    }

    let filtered = filter_tools(catalog, search, category);
    let mut all = String::new();
    for tool in filtered.iter().copied() {
        let badge = if tool.featured { " <span class=\"badge\">Featured</span>" } else { "" };
        let _ = write!(
            all,
            "<li class=\"card tool\"><h3>{name}{badge}</h3><p>{description}</p>\
             <small>{category} · ★ {rating:.1}</small><p>{tags}</p>\
             <a href=\"{url}\" target=\"_blank\" rel=\"noopener\">Visit</a> {bookmark}</li>",
            name = escape(&tool.name),
            description = escape(&tool.description),
            category = escape(&tool.category),
            rating = tool.rating,
            tags = tags(tool, 3),
            url = escape(&tool.url),
            bookmark = bookmark_button(tool),
        );
    }

    format!(
        "<h1>Development Tools</h1><p>Essential tools and resources for your development journey</p>\
         <form method=\"get\" action=\"/tools\">\
         <input type=\"search\" name=\"q\" placeholder=\"Search tools...\" value=\"{search}\">\
         <input type=\"hidden\" name=\"category\" value=\"{category}\">\
         <input type=\"hidden\" name=\"bookmarks\" value=\"{marks}\">\
         <button type=\"submit\">Search</button></form>\
         <p class=\"categories\">{category_links}</p>\
         <section><h2>Featured Tools</h2><ul class=\"grid\">{featured}</ul></section>\
         <section><h2>All Tools ({count})</h2><ul class=\"grid\">{all}</ul></section>",
        search = escape(search),
        category = escape(category),
        marks = bookmarks.encode(),
        count = filtered.len(),
    )
}
