//! Role-based access rules.

use crate::entities::Profile;
use crate::enums::UserRole;

impl UserRole {
    /// Create and edit ledgers, orders, challans, expenses, and vouchers.
    #[must_use]
    pub const fn can_edit_records(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Read change logs.
    #[must_use]
    pub const fn can_view_logs(self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// List, invite, and change the role or status of users.
    #[must_use]
    pub const fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Whether `viewer` may open `target_id`'s profile.
#[must_use]
pub fn can_view_profile(viewer: &Profile, target_id: &str) -> bool {
    viewer.user_role.can_manage_users() || viewer.id == target_id
}

/// Whether `viewer` may edit `target_id`'s profile fields.
///
/// Role and status changes additionally need [`UserRole::can_manage_users`].
#[must_use]
pub fn can_edit_profile(viewer: &Profile, target_id: &str) -> bool {
    can_view_profile(viewer, target_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(UserRole::Admin, true, true, true)]
    #[case(UserRole::Manager, true, true, false)]
    #[case(UserRole::Staff, false, false, false)]
    fn role_matrix(
        #[case] role: UserRole,
        #[case] edit: bool,
        #[case] logs: bool,
        #[case] users: bool,
    ) {
        assert_eq!(role.can_edit_records(), edit);
        assert_eq!(role.can_view_logs(), logs);
        assert_eq!(role.can_manage_users(), users);
    }
}
