//! Adapters for the collaborators around the staging set: folder traversal,
//! file pickers, user notifications, and the sender.

pub mod notify;
pub mod path;
pub mod picker;
pub mod send;
pub mod walk;
