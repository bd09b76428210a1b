//! Static demo data bundled with the portal.
//!
//! Screens treat these as read-only input. Anything a screen "adds" lives in a
//! copy built for one response.

use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

// --- Dashboard ---

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub caption: &'static str,
}

pub const ADMIN_STATS: [StatCard; 4] = [
    StatCard { title: "Total Interns", value: "68", caption: "+2 this week" },
    StatCard { title: "Present Today", value: "64", caption: "94% attendance" },
    StatCard { title: "Active Modules", value: "12", caption: "3 completed" },
    StatCard { title: "Avg. Performance", value: "87%", caption: "+5% from last month" },
];

pub const INTERN_QUICK_STATS: [StatCard; 3] = [
    StatCard { title: "Attendance", value: "92%", caption: "This month" },
    StatCard { title: "Modules", value: "8/12", caption: "Completed" },
    StatCard { title: "Performance", value: "A-", caption: "Average Grade" },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub text: &'static str,
    pub time: &'static str,
}

pub const RECENT_ACTIVITY: [Activity; 3] = [
    Activity { text: "Sarah Johnson marked present", time: "2 minutes ago" },
    Activity { text: "New intern added: Mike Chen", time: "1 hour ago" },
    Activity { text: "Week 11 syllabus uploaded", time: "3 hours ago" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
    Urgent,
}

impl NoticeKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Info => "info",
            NoticeKind::Warning => "warning",
            NoticeKind::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub title: &'static str,
    pub message: &'static str,
    pub time: &'static str,
    pub kind: NoticeKind,
}

pub const NOTIFICATIONS: [Notice; 3] = [
    Notice {
        id: 1,
        title: "New syllabus uploaded for Week 12",
        message: "Advanced React Patterns and Performance Optimization",
        time: "2 hours ago",
        kind: NoticeKind::Info,
    },
    Notice {
        id: 2,
        title: "Attendance reminder",
        message: "Please mark your attendance for today",
        time: "1 day ago",
        kind: NoticeKind::Warning,
    },
    Notice {
        id: 3,
        title: "Project deadline approaching",
        message: "React Portfolio Project due in 3 days",
        time: "2 days ago",
        kind: NoticeKind::Urgent,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct ImportantDate {
    pub id: u32,
    pub title: &'static str,
    pub date: NaiveDate,
    pub kind: &'static str,
}

pub fn important_dates() -> Vec<ImportantDate> {
    vec![
        ImportantDate {
            id: 1,
            title: "Mid-term Assessment",
            date: date(2024, 2, 15),
            kind: "exam",
        },
        ImportantDate {
            id: 2,
            title: "Project Presentation",
            date: date(2024, 2, 20),
            kind: "presentation",
        },
        ImportantDate {
            id: 3,
            title: "Team Meeting",
            date: date(2024, 2, 12),
            kind: "meeting",
        },
    ]
}

// --- Attendance ---

#[derive(Debug, Clone, PartialEq)]
pub struct InternRecord {
    pub id: u32,
    pub name: &'static str,
    pub email: &'static str,
    /// Long-run attendance percentage.
    pub average: u8,
    /// Mark shown before the administrator touches today's sheet.
    pub present_today: bool,
}

pub static INTERNS: [InternRecord; 5] = [
    InternRecord {
        id: 1,
        name: "Sarah Johnson",
        email: "sarah.j@email.com",
        average: 92,
        present_today: true,
    },
    InternRecord {
        id: 2,
        name: "Mike Chen",
        email: "mike.c@email.com",
        average: 88,
        present_today: true,
    },
    InternRecord {
        id: 3,
        name: "Emily Rodriguez",
        email: "emily.r@email.com",
        average: 96,
        present_today: true,
    },
    InternRecord {
        id: 4,
        name: "James Wilson",
        email: "james.w@email.com",
        average: 84,
        present_today: false,
    },
    InternRecord {
        id: 5,
        name: "Lisa Park",
        email: "lisa.p@email.com",
        average: 91,
        present_today: true,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub present: bool,
}

pub fn attendance_history() -> Vec<AttendanceDay> {
    vec![
        AttendanceDay { date: date(2024, 1, 22), present: true },
        AttendanceDay { date: date(2024, 1, 21), present: true },
        AttendanceDay { date: date(2024, 1, 20), present: false },
        AttendanceDay { date: date(2024, 1, 19), present: true },
        AttendanceDay { date: date(2024, 1, 18), present: true },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub rate: u8,
    pub days_present: u32,
    pub days_total: u32,
    pub days_absent: u32,
}

pub const INTERN_ATTENDANCE: AttendanceSummary = AttendanceSummary {
    rate: 92,
    days_present: 18,
    days_total: 20,
    days_absent: 2,
};

// --- Syllabus ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Pdf,
    Link,
    Video,
    Code,
}

impl ResourceKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Pdf => "pdf",
            ResourceKind::Link => "link",
            ResourceKind::Video => "video",
            ResourceKind::Code => "code",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub name: String,
    pub url: String,
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekStatus {
    Completed,
    Current,
    Upcoming,
}

impl WeekStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            WeekStatus::Completed => "completed",
            WeekStatus::Current => "current",
            WeekStatus::Upcoming => "upcoming",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyllabusWeek {
    pub id: u32,
    pub week: u32,
    pub title: String,
    pub description: String,
    pub resources: Vec<Resource>,
    pub status: WeekStatus,
    pub upload_date: Option<NaiveDate>,
}

fn resource(name: &str, kind: ResourceKind) -> Resource {
    Resource {
        name: name.to_string(),
        url: "#".to_string(),
        kind,
    }
}

pub fn syllabus() -> Vec<SyllabusWeek> {
    vec![
        SyllabusWeek {
            id: 1,
            week: 1,
            title: "Introduction to Programming Fundamentals".to_string(),
            description: "Basic programming concepts, variables, and data types".to_string(),
            resources: vec![
                resource("Lecture Slides", ResourceKind::Pdf),
                resource("Practice Exercises", ResourceKind::Link),
                resource("Video Tutorial", ResourceKind::Video),
            ],
            status: WeekStatus::Completed,
            upload_date: Some(date(2024, 1, 8)),
        },
        SyllabusWeek {
            id: 2,
            week: 2,
            title: "Control Structures and Functions".to_string(),
            description: "Loops, conditionals, and function definitions".to_string(),
            resources: vec![
                resource("Code Examples", ResourceKind::Code),
                resource("Assignment", ResourceKind::Pdf),
            ],
            status: WeekStatus::Current,
            upload_date: Some(date(2024, 1, 15)),
        },
        SyllabusWeek {
            id: 3,
            week: 3,
            title: "Object-Oriented Programming".to_string(),
            description: "Classes, objects, inheritance, and polymorphism".to_string(),
            resources: vec![],
            status: WeekStatus::Upcoming,
            upload_date: None,
        },
    ]
}

// --- Roadmap ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapStep {
    pub id: u32,
    pub title: &'static str,
    pub completed: bool,
    pub resources: u32,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roadmap {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
    pub steps: Vec<RoadmapStep>,
}

/// Steps are listed in order: the completed prefix, then the current step,
/// then the rest.
fn steps(completed: usize, entries: &[(&'static str, u32)]) -> Vec<RoadmapStep> {
    entries
        .iter()
        .enumerate()
        .map(|(index, &(title, resources))| RoadmapStep {
            id: index as u32 + 1,
            title,
            completed: index < completed,
            resources,
            current: index == completed,
        })
        .collect()
}

pub fn roadmaps() -> Vec<Roadmap> {
    vec![
        Roadmap {
            id: 1,
            title: "Frontend Development",
            description: "Master modern frontend technologies and frameworks",
            difficulty: Difficulty::Intermediate,
            estimated_time: "8 weeks",
            steps: steps(
                7,
                &[
                    ("HTML & CSS Fundamentals", 3),
                    ("JavaScript Basics", 5),
                    ("DOM Manipulation", 4),
                    ("ES6+ Features", 3),
                    ("React Fundamentals", 6),
                    ("React Hooks", 4),
                    ("State Management", 5),
                    ("React Router", 3),
                    ("Testing with Jest", 4),
                    ("Performance Optimization", 3),
                    ("TypeScript Integration", 5),
                    ("Deployment & CI/CD", 4),
                ],
            ),
        },
        Roadmap {
            id: 2,
            title: "Backend Development",
            description: "Build robust server-side applications and APIs",
            difficulty: Difficulty::Advanced,
            estimated_time: "10 weeks",
            steps: steps(
                3,
                &[
                    ("Node.js Basics", 4),
                    ("Express Framework", 5),
                    ("Database Design", 6),
                    ("Authentication & Security", 7),
                    ("RESTful APIs", 5),
                    ("GraphQL", 4),
                    ("Testing & Documentation", 3),
                    ("Caching & Performance", 4),
                    ("Microservices", 6),
                    ("DevOps & Deployment", 5),
                ],
            ),
        },
        Roadmap {
            id: 3,
            title: "Full Stack Integration",
            description: "Connect frontend and backend into complete applications",
            difficulty: Difficulty::Advanced,
            estimated_time: "6 weeks",
            steps: steps(
                0,
                &[
                    ("Project Architecture", 4),
                    ("API Integration", 5),
                    ("Real-time Features", 3),
                    ("File Upload & Processing", 4),
                    ("Payment Integration", 5),
                    ("Email & Notifications", 3),
                    ("Performance Monitoring", 4),
                    ("Production Deployment", 6),
                ],
            ),
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Achievement {
    pub title: &'static str,
    pub detail: &'static str,
}

pub const ACHIEVEMENTS: [Achievement; 2] = [
    Achievement {
        title: "Frontend Fundamentals Master",
        detail: "Completed 7 steps in Frontend Development",
    },
    Achievement {
        title: "Backend Explorer",
        detail: "Started Backend Development journey",
    },
];

// --- Tools ---

#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub url: String,
    pub featured: bool,
    pub rating: f32,
    pub tags: Vec<String>,
}

pub const TOOL_CATEGORIES: [&str; 6] = [
    "All",
    "Code Editor",
    "Design",
    "Database",
    "API Testing",
    "Debugging",
];

/// Tools bookmarked before the intern changes anything.
pub const DEFAULT_BOOKMARKS: [u32; 2] = [1, 2];

fn tool(
    id: u32,
    name: &str,
    description: &str,
    category: &str,
    url: &str,
    featured: bool,
    rating: f32,
    tags: &[&str],
) -> Tool {
    Tool {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        url: url.to_string(),
        featured,
        rating,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

pub fn tools() -> Vec<Tool> {
    vec![
        tool(
            1,
            "Visual Studio Code",
            "Powerful source code editor with extensive extension support",
            "Code Editor",
            "https://code.visualstudio.com",
            true,
            4.9,
            &["free", "cross-platform", "extensions"],
        ),
        tool(
            2,
            "Figma",
            "Collaborative interface design tool for UI/UX designers",
            "Design",
            "https://figma.com",
            true,
            4.8,
            &["design", "collaboration", "prototyping"],
        ),
        tool(
            3,
            "MongoDB Compass",
            "GUI for MongoDB database administration and querying",
            "Database",
            "https://mongodb.com/products/compass",
            false,
            4.6,
            &["database", "mongodb", "gui"],
        ),
        tool(
            4,
            "Postman",
            "API development and testing platform",
            "API Testing",
            "https://postman.com",
            true,
            4.7,
            &["api", "testing", "development"],
        ),
        tool(
            5,
            "React DevTools",
            "Browser extension for debugging React components",
            "Debugging",
            "https://react.dev/learn/react-developer-tools",
            false,
            4.8,
            &["react", "debugging", "extension"],
        ),
    ]
}
