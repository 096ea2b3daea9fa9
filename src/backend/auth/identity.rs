/**
 * Identity and Role Gates
 *
 * `Identity` is what a verified token resolves to. The gates are plain
 * predicates over it; the middleware and handlers decide where to apply
 * them.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::UserId;
use crate::backend::error::BackendError;
use crate::shared::Role;

/// Verified caller identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Allow only callers whose role is exactly `allowed`
pub fn require_role(identity: &Identity, allowed: Role) -> Result<(), BackendError> {
    require_any_role(identity, &[allowed])
}

/// Allow callers holding any of the `allowed` roles
pub fn require_any_role(identity: &Identity, allowed: &[Role]) -> Result<(), BackendError> {
    if allowed.contains(&identity.role) {
        return Ok(());
    }

    tracing::warn!(
        user_id = identity.user_id,
        role = %identity.role,
        "Role check failed"
    );

    let message = match allowed {
        [Role::Admin] => "Access denied. Admins only.".to_string(),
        [only] => format!("Access denied. {} accounts only.", only),
        _ => format!(
            "Access denied. Requires one of: {}",
            allowed.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
        ),
    };
    Err(BackendError::forbidden(message))
}

/// Allow the account owner or an admin
pub fn require_self_or_admin(identity: &Identity, target: UserId) -> Result<(), BackendError> {
    if identity.user_id == target || identity.is_admin() {
        Ok(())
    } else {
        Err(BackendError::forbidden(
            "Access denied. You can only delete your own account.",
        ))
    }
}
