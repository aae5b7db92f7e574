use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Roles carried by the signed-in user, persisted by the identity service
/// as small integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Employee,
    Recruiter,
    Admin,
}

impl ActorRole {
    pub const fn ordered() -> [Self; 3] {
        [Self::Employee, Self::Recruiter, Self::Admin]
    }

    pub const fn code(self) -> u8 {
        match self {
            Self::Employee => 0,
            Self::Recruiter => 1,
            Self::Admin => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ordered().into_iter().find(|role| role.code() == code)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Recruiter => "Recruiter",
            Self::Admin => "Admin",
        }
    }
}

/// Snapshot of the signed-in user read from the session collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub role: ActorRole,
    pub is_manager: bool,
}

/// Session collaborator. An absent or unreadable session yields `None`,
/// which every permission check treats as a denial.
pub trait SessionProvider: Send + Sync {
    fn current_actor(&self) -> Option<Actor>;
}

/// Role specification guarding one gated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRequirement {
    pub role: ActorRole,
    pub require_manager: bool,
}

impl RoleRequirement {
    pub const fn role(role: ActorRole) -> Self {
        Self {
            role,
            require_manager: false,
        }
    }

    pub const fn manager(role: ActorRole) -> Self {
        Self {
            role,
            require_manager: true,
        }
    }
}

/// Pure permission predicate over the supplied actor state. Fails closed.
pub fn evaluate(actor: Option<&Actor>, requirement: RoleRequirement) -> bool {
    match actor {
        Some(actor) => {
            actor.role == requirement.role && (!requirement.require_manager || actor.is_manager)
        }
        None => false,
    }
}

/// Gate bound to a session provider so call sites do not read ambient
/// session state directly.
pub struct RoleGate<P> {
    provider: Arc<P>,
}

impl<P: SessionProvider> RoleGate<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub fn permits(&self, requirement: RoleRequirement) -> bool {
        let actor = self.provider.current_actor();
        evaluate(actor.as_ref(), requirement)
    }

    pub fn current_actor(&self) -> Option<Actor> {
        self.provider.current_actor()
    }
}
