//! Redress: a student complaint tracker
//!
//! The heart is the complaint lifecycle manager in [`core::lifecycle`]: a
//! storage- and transport-agnostic state machine with an explicit role check
//! inside every operation. The CLI in [`cli`] is one front end over it.

pub mod cli;
pub mod core;
pub mod entities;
