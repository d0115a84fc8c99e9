//! Event and command abstractions shared by catalog domain modules.

pub mod command;
pub mod event;

pub use command::Command;
pub use event::Event;
