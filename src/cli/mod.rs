//! # CLI Module
//!
//! User-facing commands, each a thin layer over the session manager, the
//! gateway and the scheduler:
//!
//! - [`auth`] - run the authorization flow from the terminal
//! - [`run`] - start the snapshot scheduler, or run one task immediately
//! - [`list_tasks`] - show the configured snapshot tasks
//!
//! Commands present errors and progress; the decisions live in the layers
//! below.

mod auth;
mod run;
mod tasks;

pub use auth::auth;
pub use run::run;
pub use tasks::list_tasks;
