//! Typed ID aliases for all portal entities.
//!
//! One marker type + alias per entity. These are incompatible types, so the
//! compiler rejects a `CommissionId` where a `WarrantyId` is expected.

pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Employee entities.
pub struct Employee;

/// Marker type for Commission submissions.
pub struct Commission;

/// Marker type for DrawRequest entities.
pub struct DrawRequest;

/// Marker type for generic EmployeeRequest entities.
pub struct EmployeeRequest;

/// Marker type for WarrantyRequest entities.
pub struct WarrantyRequest;

/// Marker type for FeedPost entities.
pub struct FeedPost;

/// Marker type for App catalog entries.
pub struct App;

/// Marker type for AppAssignment rows.
pub struct AppAssignment;

/// Marker type for OnboardingTask templates.
pub struct OnboardingTask;

/// Marker type for AuditEntry rows.
pub struct AuditEntry;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Employee entities.
pub type EmployeeId = Id<Employee>;

/// Typed ID for Commission submissions.
pub type CommissionId = Id<Commission>;

/// Typed ID for DrawRequest entities.
pub type DrawRequestId = Id<DrawRequest>;

/// Typed ID for generic EmployeeRequest entities.
pub type RequestId = Id<EmployeeRequest>;

/// Typed ID for WarrantyRequest entities.
pub type WarrantyId = Id<WarrantyRequest>;

/// Typed ID for FeedPost entities.
pub type FeedPostId = Id<FeedPost>;

/// Typed ID for App catalog entries.
pub type AppId = Id<App>;

/// Typed ID for AppAssignment rows.
pub type AppAssignmentId = Id<AppAssignment>;

/// Typed ID for OnboardingTask templates.
pub type OnboardingTaskId = Id<OnboardingTask>;

/// Typed ID for AuditEntry rows.
pub type AuditEntryId = Id<AuditEntry>;
