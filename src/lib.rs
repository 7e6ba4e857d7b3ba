//! repoforge — one-shot repository provisioning.
//!
//! Verifies local tooling, snapshots the working tree, ensures a hosted
//! repository and remote link, fans out a fixed set of feature branches with
//! marker commits and pull requests, and optionally provisions storage
//! buckets and delegates to a local setup script.
//!
//! Everything runs strictly sequentially: each external call (git, gh, REST)
//! completes before the next one starts. Failures after bootstrap are
//! values, not errors — see [`outcome::StepOutcome`].

pub mod bootstrap;
pub mod config;
pub mod doctor;
pub mod error;
pub mod exec;
pub mod fanout;
pub mod git;
pub mod hosting;
pub mod orchestrator;
pub mod outcome;
pub mod plan;
pub mod prompt;
pub mod remote;
pub mod setup_delegate;
pub mod storage;

pub use error::FatalError;
pub use outcome::StepOutcome;
