//! prisma-edl: Prisma Access egress addresses as an External Dynamic List
//!
//! A library for retrieving a tenant's Prisma Access egress addresses and
//! rendering them as a line-oriented EDL file, keeping an iteration counter
//! and the last change time across runs.

pub mod api;
pub mod config;
pub mod edl;
pub mod state;
pub mod time;
