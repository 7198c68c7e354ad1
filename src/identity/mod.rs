//! Central identity and session management for the portal.
//! Keep the public surface thin and split implementation across sub-modules.

mod authorizer;
mod provider;
mod session;
mod user;

pub use authorizer::{check_access, Access};
pub use provider::{AuthProvider, MockDirectory, UserRecord};
pub use session::{Session, SessionManager, SessionPhase, TOKEN_KEY, USER_KEY};
pub use user::{ChildSummary, Role, User};
