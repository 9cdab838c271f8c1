//! Application layer: the handler wiring domain rules to ports.

pub mod service;

pub use service::BusinessRegistrationHandler;
