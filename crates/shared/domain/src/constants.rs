//! Domain-level constants.
//!
//! User-facing messages are part of the API contract and are asserted on by
//! clients, so they are kept verbatim here.

// =============================================================================
// Validation
// =============================================================================

pub const FIRST_NAME_REQUIRED: &str = "First name can not be empty.";

pub const LAST_NAME_REQUIRED: &str = "Last name can not be empty.";

pub const EMAIL_REQUIRED: &str = "Email can not be empty.";

/// Returned when a user payload is missing altogether
pub const USER_REQUIRED: &str = "User can not be empty.";

/// Returned when a request needs a user id and none (or the nil id) was given
pub const USER_ID_REQUIRED: &str = "User id can not be empty.";

pub const USER_ID_INVALID: &str = "User id is not a valid identifier.";

/// Returned when a user body is present but is not a well-formed user
pub const USER_PAYLOAD_INVALID: &str = "User payload is malformed.";

// =============================================================================
// Conflicts & lookups
// =============================================================================

pub const EMAIL_ALREADY_EXISTS: &str = "Email already exist.";

pub const NO_USER_FOUND: &str = "No user found.";

pub const USER_NOT_FOUND: &str = "User not found.";

pub const USER_NOT_UPDATED: &str = "User either not found or unable to update.";

// =============================================================================
// Application errors
// =============================================================================

pub const UNABLE_TO_DELETE_USER: &str = "Unable to delete this user.";
