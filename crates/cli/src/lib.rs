//! Shared plumbing for the `bins/` drivers: logging, the Rayon pool and
//! the argument groups more than one driver accepts.

pub mod args;
pub mod logging;

pub use args::{init_threads, parse_list, Mitigation, NoiseArgs};
pub use logging::init_logging;
