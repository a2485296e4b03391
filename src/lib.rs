//! # toastbox
//!
//! Transient notification (toast) service. The `services` layer holds the
//! toast manager, a file-backed preference store and theme resolution; the
//! `routes` layer exposes them over HTTP and a websocket viewport feed.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
