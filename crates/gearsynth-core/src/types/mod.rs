//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: callback aliases and the cooperative cancellation token.
//! - [`profile`]: the driving outline selector.

pub mod aliases;
pub mod profile;

pub use aliases::*;
pub use profile::ProfileKind;
