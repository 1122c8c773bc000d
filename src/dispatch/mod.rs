//! Inbound action dispatch.
//!
//! The transport classifies each update into an [`InboundAction`]. The
//! [`ActionRouter`] upserts the sender, looks up their pending interaction,
//! performs at most one task operation, and renders the next
//! [`crate::view::Screen`]. Errors are classified by [`FailureKind`] and
//! turned into user-facing notices.

mod callback;
mod error;
mod input;
mod router;

pub use callback::{
    CallbackAction, CallbackDecodeError, CardAction, DueChoice, MAX_CALLBACK_BYTES,
};
pub use error::{DispatchError, DispatchResult, FailureKind};
pub use input::{Command, InboundAction, MenuItem, UserInput, normalise};
pub use router::{ActionRouter, EXPIRED_NOTICE, RouterDeps};

#[cfg(test)]
mod tests;
