//! Data Transfer Objects for the remote APIs
//!
//! Wire shapes of the GitHub and Travis-CI responses the client decodes.
//! Only the fields the exporters read are modelled; everything else in the
//! payloads is ignored.

pub mod github;
pub mod travis;
