//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the shared API state and the system routes.
//!
//! ## Config loading
//! ```rust,no_run
//! use chub_kernel::config::load_config;
//! use chub_kernel::domain::config::ApiConfig;
//!
//! let cfg: ApiConfig = load_config(None::<&str>).unwrap();
//! assert_eq!(cfg.server.port, 8080);
//! ```
pub mod config;
pub mod prelude;
#[cfg(feature = "server")]
pub mod server;

pub use chub_domain as domain;
