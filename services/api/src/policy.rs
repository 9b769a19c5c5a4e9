//! Access policy checks
//!
//! A booking may be read, updated, or cancelled by its owner or by an
//! admin; everyone else gets a Forbidden response, distinct from NotFound.

use uuid::Uuid;

use crate::middleware::AuthUser;
use crate::models::UserRole;

/// Owner-or-admin rule applied to booking read, update, and cancel
pub fn can_access(owner_id: Uuid, requester: &AuthUser) -> bool {
    requester.id == owner_id || requester.role == UserRole::Admin
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role,
        }
    }

    #[test]
    fn owner_can_access() {
        let requester = user(UserRole::User);
        assert!(can_access(requester.id, &requester));
    }

    #[test]
    fn admin_can_access_any_booking() {
        let admin = user(UserRole::Admin);
        assert!(can_access(Uuid::new_v4(), &admin));
    }

    #[test]
    fn stranger_is_denied() {
        let requester = user(UserRole::User);
        assert!(!can_access(Uuid::new_v4(), &requester));
    }
}
