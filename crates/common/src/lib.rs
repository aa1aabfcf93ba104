//! Common crate
//!
//! Shared configuration, key rendering, and error handling for widescan.
//!
//! # Example
//! ```rust
//! use widescan_common::Error;
//! let err = Error::malformed(0, "missing terminal empty key");
//! assert!(!err.is_transport());
//! ```

pub mod error;
pub mod key;
pub mod settings;

pub use settings::Settings;
pub use error::{Error, Result};
