//! Application services for the user directory.

mod registration;

pub use registration::UserRegistrationService;
