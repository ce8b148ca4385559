use std::io;

use async_trait::async_trait;
use utilities::command_executor::CommandSender;

use super::commands::{MotionRequest, MotionResponse};
use crate::{
    command_executor::MotionDispatcher,
    models::{MotionCommand, StatusReadout},
};

#[derive(Clone)]
pub struct MotionCommandSender {
    sender: CommandSender<MotionRequest>,
}

impl MotionCommandSender {
    pub fn new(sender: CommandSender<MotionRequest>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl MotionDispatcher for MotionCommandSender {
    async fn dispatch(&self, command: MotionCommand) -> io::Result<()> {
        let response = self
            .sender
            .send_command(MotionRequest::Execute(command))
            .await?;

        match response {
            MotionResponse::Ok => Ok(()),
            _ => Err(io::Error::other("Unexpected response type")),
        }
    }

    async fn status(&self) -> io::Result<StatusReadout> {
        let response = self.sender.send_command(MotionRequest::GetStatus).await?;

        match response {
            MotionResponse::Status(status) => Ok(status),
            _ => Err(io::Error::other("Unexpected response type")),
        }
    }
}
