//! Crate error type.
//!
//! Animation code never fails; errors only come from the terminal and from
//! layout. Click feedback has its own [`FeedbackError`](crate::feedback::FeedbackError)
//! that is always swallowed.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
