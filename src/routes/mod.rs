/// Router Module Index
///
/// Splits routing by what a request needs before it reaches a handler. Only
/// `public` runs without a session; the other three sit behind the session
/// middleware, and the screen router additionally consults the route gate in
/// every handler.

/// Liveness probe. No session.
pub mod public;

/// Form actions that move a session through the gate.
pub mod session;

/// JSON mirror of the session actions plus route resolution.
pub mod api;

/// Gated HTML navigation and the admin form posts.
pub mod screens;
