use strum::{AsRefStr, EnumString};

/// Account roles stored in `Users.role`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Employee,
    Manager,
    Admin,
}

impl Role {
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Frontend route a freshly logged-in user is sent to.
    pub fn dashboard_path(role: Option<Role>) -> &'static str {
        match role {
            Some(Role::Employee) => "/employee_dashboard",
            Some(Role::Manager | Role::Admin) => "/admin_dashboard",
            None => "/",
        }
    }
}
