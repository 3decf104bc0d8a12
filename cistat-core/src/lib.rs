//! Cistat Core
//!
//! Core types shared by the cistat client and command-line tool.
//!
//! This crate contains:
//! - Domain types: commits, commit states, status entries and rate-limit state
//! - DTOs: wire shapes of the GitHub and Travis-CI responses

pub mod domain;
pub mod dto;
