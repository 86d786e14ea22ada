//! Session domain module

mod core;
mod state;

pub use core::{SessionCore, SessionCoreError};
pub use state::{ErrorState, InvalidPhaseTransition, SessionPhase};
