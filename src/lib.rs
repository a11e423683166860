//! Async client for the Gala event-planning REST API.
//!
//! The crate is organised around a session-aware [`transport::api_client::ApiClient`]:
//! it attaches the current access credential to every request, collapses
//! concurrent credential refreshes into a single network call, retries an
//! expired request exactly once, and hands unrecoverable session loss to an
//! application-provided observer (typically a redirect to the login route).

pub mod application;

pub mod config;

pub(crate) mod constants;

pub mod error;

pub mod session;

pub mod storage;

pub mod transport;

pub mod utils;
