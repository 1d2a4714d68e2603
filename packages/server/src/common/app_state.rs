//! Per-request caller identity and role flags.

use crate::common::EmployeeId;

/// Request-scoped caller state, derived from the verified JWT.
///
/// The same shape is used by every domain; role checks live here so the
/// branching stays in one place.
#[derive(Clone, Default)]
pub struct AppState {
    /// The authenticated employee's ID, if any.
    pub employee_id: Option<EmployeeId>,
    /// Whether the caller has the admin role.
    pub is_admin: bool,
    /// Whether the caller has the manager role.
    pub is_manager: bool,
}

impl AppState {
    /// Create state for an authenticated caller.
    pub fn authenticated(employee_id: EmployeeId, is_admin: bool, is_manager: bool) -> Self {
        Self {
            employee_id: Some(employee_id),
            is_admin,
            is_manager,
        }
    }

    /// Create state for an unauthenticated request.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Check if the caller is authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.employee_id.is_some()
    }

    /// A reviewer approves/rejects items submitted by others: admin or manager.
    pub fn is_reviewer(&self) -> bool {
        self.employee_id.is_some() && (self.is_admin || self.is_manager)
    }

    /// Require the caller to be authenticated. Returns the employee ID.
    pub fn require_auth(&self) -> anyhow::Result<EmployeeId> {
        self.employee_id
            .ok_or_else(|| anyhow::anyhow!("Unauthenticated: Valid JWT required"))
    }

    /// Require the caller to be an admin.
    pub fn require_admin(&self) -> anyhow::Result<EmployeeId> {
        let employee_id = self.require_auth()?;
        if !self.is_admin {
            anyhow::bail!("Unauthorized: Admin access required");
        }
        Ok(employee_id)
    }

    /// Require the caller to be a reviewer (admin or manager).
    pub fn require_reviewer(&self) -> anyhow::Result<EmployeeId> {
        let employee_id = self.require_auth()?;
        if !(self.is_admin || self.is_manager) {
            anyhow::bail!("Unauthorized: Reviewer access required");
        }
        Ok(employee_id)
    }
}
