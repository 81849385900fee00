//! Exit code constants for the dof CLI.
//!
//! One code per termination reason:
//! - 0: Success
//! - 1: A handler reported an error (`error`)
//! - 2: The invocation failed, e.g. unknown command (`fail`)
//! - 3: Handler binding or execution exception (`exceptor`)
//! - 4: Bootstrap or assembly failure (`throwable`)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// A handler reported an error through the console.
pub const HANDLER_ERROR: i32 = 1;

/// The invocation failed: unknown command or a handler-reported failure.
pub const INVOCATION_FAILED: i32 = 2;

/// Handler binding failed or the handler raised.
pub const EXCEPTOR: i32 = 3;

/// The process failed before dispatch.
pub const THROWABLE: i32 = 4;
