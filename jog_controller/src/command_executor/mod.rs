use std::io;

use async_trait::async_trait;

use crate::models::{MotionCommand, StatusReadout};

pub mod motion;

/// Destination of the commands produced by the jog page.
#[async_trait]
pub trait MotionDispatcher: Send + Sync {
    async fn dispatch(&self, command: MotionCommand) -> io::Result<()>;
    async fn status(&self) -> io::Result<StatusReadout>;
}
