//! Client library for the fakecloud virtual machine API.
//!
//! Each call on [`Client`] maps to one HTTP request against the service and
//! returns either the decoded entity or an [`Error`].

pub mod client;
pub mod error;
pub mod types;

pub use client::Client;
pub use error::{Error, Result};
pub use types::{NewVirtualMachine, VirtualMachine};
