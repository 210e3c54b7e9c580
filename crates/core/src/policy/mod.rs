//! Role-based access predicates.
//!
//! These predicates gate edit/delete affordances and admin-only views in the
//! presentation layer. They are a client-side convenience ONLY: authoritative
//! enforcement belongs to the backing store's own access rules (row-level
//! security), which is outside this crate's scope. Never treat these checks
//! as a security boundary.

use kasbook_shared::profile::Role;
use kasbook_shared::types::UserId;

/// Returns true if the actor may edit or delete a transaction owned by
/// `owner_id`.
///
/// Admins may modify anything; employees only their own transactions.
#[must_use]
pub fn can_modify(actor_role: Role, actor_id: UserId, owner_id: UserId) -> bool {
    match actor_role {
        Role::Admin => true,
        Role::Employee => actor_id == owner_id,
    }
}

/// Returns true if the role may open admin-only views (category and user
/// management).
#[must_use]
pub const fn can_access_admin_page(role: Role) -> bool {
    role.is_admin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_admin_can_modify_anything() {
        let actor = UserId::new();
        let owner = UserId::new();
        assert!(can_modify(Role::Admin, actor, owner));
        assert!(can_modify(Role::Admin, actor, actor));
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn test_employee_only_own_rows(#[case] owns_it: bool) {
        let actor = UserId::new();
        let owner = if owns_it { actor } else { UserId::new() };
        assert_eq!(can_modify(Role::Employee, actor, owner), owns_it);
    }

    #[test]
    fn test_admin_page_gate() {
        assert!(can_access_admin_page(Role::Admin));
        assert!(!can_access_admin_page(Role::Employee));
    }
}
