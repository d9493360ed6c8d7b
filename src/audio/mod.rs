pub mod clock;
pub mod engine;
pub mod error;
pub mod progress;
pub mod state;
