//! Repository implementations module.
//!
//! This module contains the implementations of the repository traits:
//! - `remote`: HTTP client for the remote record-store API
//! - `local`: in-memory implementation for unit testing, local development
//!   and demo mode
pub mod local;
#[cfg(feature = "remote-repo")]
pub mod remote;

pub use local::LocalRepository;
#[cfg(feature = "remote-repo")]
pub use remote::{RecordStoreClient, RemoteConfig, RemoteRepository};
