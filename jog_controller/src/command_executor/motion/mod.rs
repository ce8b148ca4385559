use std::io;

use tracing::info;
use utilities::command_executor::{CommandExecutor, DeviceHandler};

use crate::models::{MotionCommand, MotionParameters, MoveTarget, StatusReadout};

use command_sender::MotionCommandSender;
use commands::MotionRequest;

pub mod command_sender;
pub mod commands;

/// Stand-in for a robot controller link: logs every command and keeps a
/// nominal readout so the status fields have something to show.
#[derive(Debug, Default)]
pub struct ConsoleMotionHandler {
    parameters: MotionParameters,
    position: i64,
    velocity: i64,
}

impl DeviceHandler for ConsoleMotionHandler {
    type Command = MotionRequest;
}

impl ConsoleMotionHandler {
    pub fn new(parameters: MotionParameters) -> Self {
        Self {
            parameters,
            ..Default::default()
        }
    }

    pub fn parameters(&self) -> &MotionParameters {
        &self.parameters
    }

    pub fn execute(&mut self, command: MotionCommand) -> io::Result<()> {
        match command {
            MotionCommand::Move(request) => {
                match request.target {
                    MoveTarget::Absolute(position) => {
                        info!("-> move absolute {}", position);
                        self.position = position;
                    }
                    MoveTarget::Relative(distance) => {
                        info!("-> move relative {}", distance);
                        self.position = self.position.saturating_add(distance);
                    }
                }
                self.velocity = 0;
            }
            MotionCommand::Jog { direction, speed } => {
                info!("-> jog direction {} speed {}", direction, speed);
                self.velocity = direction.sign().saturating_mul(speed);
            }
            MotionCommand::Stop => {
                info!("-> stop");
                self.velocity = 0;
            }
            MotionCommand::ApplyParameters(parameters) => {
                info!("-> parameters {:?}", parameters);
                self.parameters = parameters;
            }
        }

        Ok(())
    }

    pub fn status(&self) -> StatusReadout {
        StatusReadout {
            position: self.position,
            velocity: self.velocity,
            current: 0.0,
        }
    }
}

pub fn create_console_executor(
    parameters: MotionParameters,
) -> (CommandExecutor<ConsoleMotionHandler>, MotionCommandSender) {
    let executor = CommandExecutor::new(ConsoleMotionHandler::new(parameters));
    let sender = MotionCommandSender::new(executor.sender());

    (executor, sender)
}
