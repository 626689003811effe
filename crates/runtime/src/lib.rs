//! Runtime collaborators for generated clients.
//!
//! Generated code never embeds policy; it reads a [`config::Snapshot`] at
//! call time and drives request attempts through [`retry::on_error`]. Both
//! pieces are usable standalone.

pub mod config;
pub mod retry;
