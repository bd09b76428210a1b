use crate::{
    models::{GateScreen, Identity, Role, RouteResolution},
    session::{GateState, Session},
    views::View,
};

/// Screen
///
/// What a navigation renders. The View Router is only consulted inside the
/// `App` arm, so a content view can never be produced for an unauthenticated
/// session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    RoleSelection,
    Login(Role),
    App { identity: Identity, view: View },
}

impl Screen {
    pub fn kind(&self) -> GateScreen {
        match self {
            Screen::RoleSelection => GateScreen::RoleSelection,
            Screen::Login(_) => GateScreen::Login,
            Screen::App { .. } => GateScreen::App,
        }
    }
}

/// decide
///
/// The route gate. Consulted first on every navigation.
pub fn decide(session: &Session, path: &str) -> Screen {
    match session.state() {
        GateState::NoRole => Screen::RoleSelection,
        GateState::RoleChosen(role) => Screen::Login(role),
        GateState::Authenticated(identity) => Screen::App {
            identity,
            view: View::resolve(path),
        },
    }
}

/// Same decision, in its wire form.
pub fn resolve_route(session: &Session, path: &str) -> RouteResolution {
    let screen = decide(session, path);
    let view = match &screen {
        Screen::App { view, .. } => Some(*view),
        Screen::RoleSelection | Screen::Login(_) => None,
    };
    RouteResolution {
        path: path.to_string(),
        gate: screen.kind(),
        view,
    }
}
