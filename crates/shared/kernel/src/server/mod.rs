pub mod error;
mod health;
mod ping;
pub mod router;
pub mod state;
