use std::io;

use utilities::command_executor::Command;

use crate::{
    command_executor::motion::ConsoleMotionHandler,
    models::{MotionCommand, StatusReadout},
};

#[derive(Debug, Clone)]
pub enum MotionRequest {
    Execute(MotionCommand),
    GetStatus,
}

#[derive(Debug)]
pub enum MotionResponse {
    Ok,
    Status(StatusReadout),
}

impl Command for MotionRequest {
    type Response = MotionResponse;
    type Handler = ConsoleMotionHandler;

    fn execute(self, handler: &mut Self::Handler) -> io::Result<Self::Response> {
        match self {
            MotionRequest::Execute(command) => {
                handler.execute(command)?;
                Ok(MotionResponse::Ok)
            }
            MotionRequest::GetStatus => Ok(MotionResponse::Status(handler.status())),
        }
    }
}
