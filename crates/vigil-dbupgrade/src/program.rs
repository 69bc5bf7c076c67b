//! Process role identification.
//!
//! Some patches only apply when the process is acting in a particular role
//! (a data cleanup that only the server should perform, for example). The
//! roles of the current process come from configuration and are read-only
//! for the lifetime of an upgrade run.

use serde::{Deserialize, Serialize};

/// One operational mode of a Vigil process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramRole {
    Server,
    Proxy,
    Agent,
    WebService,
}

impl ProgramRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Proxy => "proxy",
            Self::Agent => "agent",
            Self::WebService => "web_service",
        }
    }
}

impl std::fmt::Display for ProgramRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of roles the current process is acting as
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramRoles(Vec<ProgramRole>);

impl ProgramRoles {
    /// Build a role set, dropping duplicates
    pub fn new(roles: impl IntoIterator<Item = ProgramRole>) -> Self {
        let mut set = Vec::new();
        for role in roles {
            if !set.contains(&role) {
                set.push(role);
            }
        }
        Self(set)
    }

    /// Role set of a plain server process
    pub fn server() -> Self {
        Self(vec![ProgramRole::Server])
    }

    /// Explicit membership test
    pub fn contains(&self, role: ProgramRole) -> bool {
        self.0.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<ProgramRole> for ProgramRoles {
    fn from_iter<I: IntoIterator<Item = ProgramRole>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let roles = ProgramRoles::server();
        assert!(roles.contains(ProgramRole::Server));
        assert!(!roles.contains(ProgramRole::Proxy));
    }

    #[test]
    fn test_duplicates_dropped() {
        let roles = ProgramRoles::new([ProgramRole::Agent, ProgramRole::Agent]);
        assert_eq!(roles, ProgramRoles::new([ProgramRole::Agent]));
    }

    #[test]
    fn test_serde_names() {
        let role: ProgramRole = toml::from_str::<std::collections::HashMap<String, ProgramRole>>(
            "role = \"web_service\"",
        )
        .unwrap()["role"];
        assert_eq!(role, ProgramRole::WebService);
        assert_eq!(ProgramRole::Server.to_string(), "server");
    }
}
