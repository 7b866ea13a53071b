//! Request principals and the deletion capability.
//!
//! There is no session layer: every mutating request carries a
//! client-claimed user id. A [`Principal`] is that claim resolved once, with
//! an explicit [`Role`], so authorization decisions read as capability
//! checks instead of id comparisons scattered through handlers.

use grapevine_core::UserId;

use super::gossip::Gossip;

/// The administrator's fixed, well-known id. The administrator is a
/// synthetic identity configured at startup; it has no row in the store.
pub const ADMIN_USER_ID: UserId = UserId::nil();

/// Rights tier of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// May delete any gossip.
    Administrator,
    /// May delete only their own gossips.
    Member,
}

/// The actor behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    id: UserId,
    role: Role,
}

impl Principal {
    /// The administrator principal.
    #[must_use]
    pub const fn administrator() -> Self {
        Self {
            id: ADMIN_USER_ID,
            role: Role::Administrator,
        }
    }

    /// A regular member principal.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self {
            id,
            role: Role::Member,
        }
    }

    /// Resolve a client-claimed id into a principal: the administrator's
    /// fixed id maps to the administrator role, anything else is a member.
    #[must_use]
    pub fn from_claimed_id(id: UserId) -> Self {
        if id == ADMIN_USER_ID {
            Self::administrator()
        } else {
            Self::member(id)
        }
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Whether this principal may delete the given gossip: administrators
    /// may delete anything, members only what they authored.
    #[must_use]
    pub fn can_delete(&self, gossip: &Gossip) -> bool {
        match self.role {
            Role::Administrator => true,
            Role::Member => gossip.author_id == self.id,
        }
    }
}
