//! Session state and role-based capabilities.
//!
//! The backend verifies the bearer token on every request; the client only
//! needs the role to decide which actions to offer, checked once at the
//! action boundary rather than scattered through view code.

/// User role, as assigned at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    Admin,
    User,
    #[default]
    Viewer,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
            Role::Viewer => "viewer",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            "viewer" => Ok(Role::Viewer),
            other => Err(format!("invalid role: {other}")),
        }
    }
}

/// A mutating action a user can attempt from the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddTicket,
    CloseTicket,
    ReopenTicket,
    DeleteTicket,
    EditBreachReason,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::AddTicket => "add ticket",
            Action::CloseTicket => "close ticket",
            Action::ReopenTicket => "reopen ticket",
            Action::DeleteTicket => "delete ticket",
            Action::EditBreachReason => "edit breach reason",
        }
    }
}

/// Capability lookup: which actions a role may perform.
fn permits(role: Role, action: Action) -> bool {
    match role {
        Role::Admin => true,
        Role::User => action != Action::DeleteTicket,
        Role::Viewer => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Active,
    Expired,
}

/// Authenticated session for the lifetime of the process.
///
/// Created once at startup from settings, and expired when the backend
/// rejects the token (401). An expired session permits no actions.
#[derive(Debug, Clone)]
pub struct Session {
    role: Role,
    state: SessionState,
}

impl Session {
    pub fn new(role: Role) -> Self {
        Self { role, state: SessionState::Active }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Tear the session down after an authentication failure.
    pub fn expire(&mut self) {
        self.state = SessionState::Expired;
    }

    /// Whether this session may perform the given action.
    pub fn allows(&self, action: Action) -> bool {
        self.is_active() && permits(self.role, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("USER".parse::<Role>().unwrap(), Role::User);
        assert_eq!("Viewer".parse::<Role>().unwrap(), Role::Viewer);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_can_do_everything() {
        let session = Session::new(Role::Admin);
        for action in [
            Action::AddTicket,
            Action::CloseTicket,
            Action::ReopenTicket,
            Action::DeleteTicket,
            Action::EditBreachReason,
        ] {
            assert!(session.allows(action), "admin should allow {action:?}");
        }
    }

    #[test]
    fn test_user_cannot_delete() {
        let session = Session::new(Role::User);
        assert!(session.allows(Action::CloseTicket));
        assert!(session.allows(Action::ReopenTicket));
        assert!(session.allows(Action::AddTicket));
        assert!(session.allows(Action::EditBreachReason));
        assert!(!session.allows(Action::DeleteTicket));
    }

    #[test]
    fn test_viewer_is_read_only() {
        let session = Session::new(Role::Viewer);
        assert!(!session.allows(Action::AddTicket));
        assert!(!session.allows(Action::CloseTicket));
        assert!(!session.allows(Action::DeleteTicket));
    }

    #[test]
    fn test_expired_session_permits_nothing() {
        let mut session = Session::new(Role::Admin);
        assert!(session.allows(Action::DeleteTicket));

        session.expire();
        assert!(!session.is_active());
        assert!(!session.allows(Action::DeleteTicket));
        assert!(!session.allows(Action::CloseTicket));
    }
}
