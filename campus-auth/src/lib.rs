//! Local account management for the campus app.
//!
//! Accounts live entirely on the device: sign-up writes to the
//! `registered_users` key, sign-in is a plain credential match against it,
//! and the active session is the `user_auth` key. There is no server and no
//! credential hardening; this mirrors the single-device trust model the rest
//! of the data core assumes.

pub mod service;

pub use service::{AuthError, AuthService, SignUpRequest};
