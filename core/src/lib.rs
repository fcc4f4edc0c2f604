#![no_std]

extern crate alloc;

pub use cell::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use recorder::*;
pub use replay::*;
pub use search::*;
pub use session::*;
pub use types::*;

mod cell;
mod config;
mod error;
mod generator;
mod grid;
mod recorder;
mod replay;
mod search;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
