// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - can view every employee's reports
pub const ROLE_ADMIN: &str = "admin";

// =============================================================================
// ERROR MESSAGE KEYS
// =============================================================================

/// Submitted fields violate static constraints
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// A report already exists for the employee on this date
pub const DATECHECK_ERROR: &str = "DATECHECK_ERROR";

/// Referenced report does not exist
pub const NOT_FOUND_ERROR: &str = "NOT_FOUND_ERROR";

/// Persistence failed
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
