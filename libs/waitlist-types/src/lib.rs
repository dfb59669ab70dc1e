//! Wire types shared by the waitlist relay and its client SDK.
//!
//! This crate provides:
//! - The submitted entry (`WaitlistEntry`) and the workspace record id
//! - Success and error response bodies returned by the relay
//! - Machine error codes used by the relay

mod entry;
mod errors;
mod responses;

pub use entry::{ExternalRecordId, WaitlistEntry};
pub use errors::ErrorCode;
pub use responses::{AddToWaitlistResponse, ErrorResponse, SUCCESS_MESSAGE};
