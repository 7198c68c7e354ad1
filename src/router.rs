//! View routing: path resolution, role menus and the dispatch decision.
//! The route table is the portal's whole URL space; `dispatch` is the single
//! entry point that turns a requested path plus the current session phase
//! into a rendering, a redirect or a loading state.

use std::collections::HashMap;

use crate::identity::{check_access, Access, Role, SessionPhase};

/// Every renderable surface in the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Dashboard,
    Schedule,
    Grades,
    Announcements,
    Profile,
    GuardianChildren,
    GuardianChildDetail,
    GuardianFinance,
    SecretaryStudents,
    SecretaryRegistrations,
    SecretaryDocuments,
    NotFound,
}

/// Who may reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable without a session.
    Public,
    /// Any signed-in user.
    Protected,
    /// Signed-in users with one of the listed roles; admins always pass.
    RoleScoped(&'static [Role]),
}

/// One row of the route table.
#[derive(Debug)]
pub struct RouteDef {
    pub path: &'static str,
    pub view: View,
    pub class: RouteClass,
}

const STUDENT_TEACHER: &[Role] = &[Role::Student, Role::Teacher];
const GUARDIAN: &[Role] = &[Role::Guardian];
const SECRETARY: &[Role] = &[Role::Secretary];

/// The portal's URL space. `:name` segments capture a parameter.
pub static ROUTES: &[RouteDef] = &[
    RouteDef { path: "/login", view: View::Login, class: RouteClass::Public },
    RouteDef { path: "/dashboard", view: View::Dashboard, class: RouteClass::Protected },
    RouteDef { path: "/schedule", view: View::Schedule, class: RouteClass::RoleScoped(STUDENT_TEACHER) },
    RouteDef { path: "/grades", view: View::Grades, class: RouteClass::RoleScoped(STUDENT_TEACHER) },
    RouteDef { path: "/announcements", view: View::Announcements, class: RouteClass::Protected },
    RouteDef { path: "/profile", view: View::Profile, class: RouteClass::Protected },
    RouteDef { path: "/guardian/children", view: View::GuardianChildren, class: RouteClass::RoleScoped(GUARDIAN) },
    RouteDef { path: "/guardian/children/:id", view: View::GuardianChildDetail, class: RouteClass::RoleScoped(GUARDIAN) },
    RouteDef { path: "/guardian/finance", view: View::GuardianFinance, class: RouteClass::RoleScoped(GUARDIAN) },
    RouteDef { path: "/secretary/students", view: View::SecretaryStudents, class: RouteClass::RoleScoped(SECRETARY) },
    RouteDef { path: "/secretary/registrations", view: View::SecretaryRegistrations, class: RouteClass::RoleScoped(SECRETARY) },
    RouteDef { path: "/secretary/documents", view: View::SecretaryDocuments, class: RouteClass::RoleScoped(SECRETARY) },
];

/// Captured `:param` values for a matched route.
pub type Params = HashMap<String, String>;

/// A path matched against the route table.
#[derive(Debug)]
pub struct Resolved {
    pub def: &'static RouteDef,
    pub params: Params,
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Match a request path against the table. The bare root is an alias for
/// `/login`, as it has always been. `None` means the path space has no such
/// view and the caller renders not-found.
pub fn resolve(path: &str) -> Option<Resolved> {
    let req = segments(path);
    if req.is_empty() {
        return resolve("/login");
    }
    'routes: for def in ROUTES {
        let pat = segments(def.path);
        if pat.len() != req.len() {
            continue;
        }
        let mut params = Params::new();
        for (p, r) in pat.iter().zip(&req) {
            if let Some(name) = p.strip_prefix(':') {
                params.insert(name.to_string(), (*r).to_string());
            } else if p != r {
                continue 'routes;
            }
        }
        return Some(Resolved { def, params });
    }
    None
}

/// One navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub path: &'static str,
    pub label: &'static str,
}

const MENU_STANDARD: &[MenuEntry] = &[
    MenuEntry { path: "/dashboard", label: "Início" },
    MenuEntry { path: "/schedule", label: "Horário" },
    MenuEntry { path: "/grades", label: "Notas" },
    MenuEntry { path: "/announcements", label: "Avisos" },
    MenuEntry { path: "/profile", label: "Perfil" },
];

const MENU_GUARDIAN: &[MenuEntry] = &[
    MenuEntry { path: "/dashboard", label: "Início" },
    MenuEntry { path: "/guardian/children", label: "Meus Filhos" },
    MenuEntry { path: "/guardian/finance", label: "Financeiro" },
    MenuEntry { path: "/announcements", label: "Avisos" },
    MenuEntry { path: "/profile", label: "Perfil" },
];

const MENU_SECRETARY: &[MenuEntry] = &[
    MenuEntry { path: "/secretary/students", label: "Alunos" },
    MenuEntry { path: "/secretary/registrations", label: "Matrículas" },
    MenuEntry { path: "/secretary/documents", label: "Documentos" },
    MenuEntry { path: "/announcements", label: "Avisos" },
    MenuEntry { path: "/profile", label: "Perfil" },
];

/// Navigation for a role, in display order.
pub fn menu_for(role: Role) -> &'static [MenuEntry] {
    match role {
        Role::Guardian => MENU_GUARDIAN,
        Role::Secretary => MENU_SECRETARY,
        Role::Student | Role::Teacher | Role::Admin => MENU_STANDARD,
    }
}

/// Role-dependent landing view: the first menu entry.
pub fn home_path(role: Role) -> &'static str {
    menu_for(role)[0].path
}

/// What the shell should do with a requested path.
#[derive(Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// Render this view with any captured params.
    Render(View, Params),
    /// Navigate to another path instead.
    Redirect(&'static str),
    /// Session restore has not settled; show the loading view.
    Loading,
}

/// Resolve a path and gate it against the current session phase.
pub fn dispatch(path: &str, phase: &SessionPhase) -> Dispatch {
    let Some(resolved) = resolve(path) else {
        return Dispatch::Render(View::NotFound, Params::new());
    };
    match check_access(phase, resolved.def) {
        Access::Allow => Dispatch::Render(resolved.def.view, resolved.params),
        Access::RedirectToLogin => Dispatch::Redirect("/login"),
        Access::RedirectToHome => match phase.user() {
            Some(u) => Dispatch::Redirect(home_path(u.role)),
            None => Dispatch::Redirect("/login"),
        },
        Access::NotFound => Dispatch::Render(View::NotFound, Params::new()),
        Access::Pending => Dispatch::Loading,
    }
}
