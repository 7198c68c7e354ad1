use tracing::debug;

use crate::router::{RouteClass, RouteDef};

use super::session::SessionPhase;
use super::user::Role;

/// Gate decision for a requested view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Render the resolved view.
    Allow,
    /// Protected view without a live session.
    RedirectToLogin,
    /// Public view with a live session; send the user to their landing view.
    RedirectToHome,
    /// Role-scoped view for a non-matching role. Rendered as not-found so the
    /// path space does not reveal which views exist for other roles.
    NotFound,
    /// Session restore has not settled yet; render a loading state.
    Pending,
}

/// Decide whether `route` may render under the current session phase.
/// Pure function of its inputs; admins pass role scoping unconditionally.
pub fn check_access(phase: &SessionPhase, route: &RouteDef) -> Access {
    let user = match phase {
        SessionPhase::Pending => return Access::Pending,
        SessionPhase::SignedOut => {
            return match route.class {
                RouteClass::Public => Access::Allow,
                RouteClass::Protected | RouteClass::RoleScoped(_) => Access::RedirectToLogin,
            };
        }
        SessionPhase::SignedIn(session) => &session.user,
    };
    match route.class {
        RouteClass::Public => Access::RedirectToHome,
        RouteClass::Protected => Access::Allow,
        RouteClass::RoleScoped(roles) => {
            // Admin shortcut
            if user.is_admin() || roles.contains(&user.role) {
                Access::Allow
            } else {
                debug!(target: "auth", "role {} out of scope for {}", user.role, route.path);
                Access::NotFound
            }
        }
    }
}
