//! Test utilities and mock collaborators for Scarp development.
//!
//! Provides scripted stand-ins for the external flow-routing contract
//! ([`ScriptedRouter`], [`ChainRouter`], [`FailingRouter`]) and simple
//! process fixtures ([`ConstProcess`], [`FailingProcess`]) for
//! exercising the driver pipeline.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod routers;

pub use fixtures::{ConstProcess, FailingProcess};
pub use routers::{ChainRouter, FailingRouter, ScriptedRouter};
