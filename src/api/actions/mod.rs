//
//  octorest
//  api/actions/mod.rs
//

//! GitHub Actions API families.
//!
//! Four resource families live under the Actions umbrella:
//!
//! - [`permissions`]: which repositories may run Actions and which actions
//!   they may use, at the organization and repository level
//! - [`secrets`]: encrypted secrets exposed to workflow runs
//! - [`workflows`]: workflow listing, manual dispatch, enable/disable
//! - [`runners`]: self-hosted runner inventory and registration tokens

pub mod permissions;

pub mod runners;

pub mod secrets;

pub mod workflows;
