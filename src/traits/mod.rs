//! Trait definitions for the seams between the core and its collaborators.

mod transport;

pub use transport::Transport;
