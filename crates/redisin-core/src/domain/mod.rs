//! Domain model (config, event, state, errors).

pub mod config;
pub mod errors;
pub mod event;
pub mod state;

pub use self::config::{DrainerConfig, StoreConfig};
pub use self::errors::{ConfigError, ConnectionError, DrainError, PoolError, StoreError};
pub use self::event::Event;
pub use self::state::DrainerState;
