use std::{
    io,
    sync::mpsc::{Receiver, Sender},
};

use tokio::sync::oneshot;
use tracing::{debug, warn};

pub trait Command: Send {
    type Response: Send;
    type Handler: DeviceHandler<Command = Self>;

    fn execute(self, handler: &mut Self::Handler) -> io::Result<Self::Response>;
}

pub trait DeviceHandler {
    type Command: Command<Handler = Self>;
}

pub struct GenericCommand<C: Command> {
    command: C,
    response_ch: oneshot::Sender<io::Result<C::Response>>,
}

impl<C: Command> GenericCommand<C> {
    pub fn new(command: C, response_ch: oneshot::Sender<io::Result<C::Response>>) -> Self {
        Self {
            command,
            response_ch,
        }
    }

    pub fn execute(self, handler: &mut C::Handler) -> io::Result<()> {
        let result = self.command.execute(handler);

        if let Err(e) = &result {
            warn!("Command failed: {}", e);
        }

        self.response_ch
            .send(result)
            .map_err(|_| io::Error::other("Failed to send response"))?;

        Ok(())
    }
}

/// Owns a device handler and executes commands against it one at a time.
///
/// The loop ends once every [`CommandSender`] obtained from the executor
/// has been dropped.
pub struct CommandExecutor<H: DeviceHandler + Send + 'static> {
    handler: H,
    commands_ch: Receiver<GenericCommand<H::Command>>,
    sender: Sender<GenericCommand<H::Command>>,
}

impl<H: DeviceHandler + Send> CommandExecutor<H> {
    pub fn new(handler: H) -> Self {
        let (sender, commands_ch) = std::sync::mpsc::channel();

        Self {
            handler,
            commands_ch,
            sender,
        }
    }

    pub fn sender(&self) -> CommandSender<H::Command> {
        CommandSender::new(self.sender.clone())
    }

    pub fn run(self) -> io::Result<()> {
        let Self {
            mut handler,
            commands_ch,
            sender,
        } = self;
        drop(sender);

        while let Ok(command) = commands_ch.recv() {
            if let Err(e) = command.execute(&mut handler) {
                // Requester went away before the answer arrived.
                debug!("Dropping response: {}", e);
                continue;
            }
        }

        debug!("Command channel closed, executor stopped");
        Ok(())
    }

    pub fn spawn(self) -> tokio::task::JoinHandle<io::Result<()>> {
        tokio::task::spawn_blocking(move || self.run())
    }
}

pub struct CommandSender<T: Command> {
    commands_ch: Sender<GenericCommand<T>>,
}

impl<C: Command> Clone for CommandSender<C> {
    fn clone(&self) -> Self {
        Self {
            commands_ch: self.commands_ch.clone(),
        }
    }
}

impl<C: Command> CommandSender<C> {
    pub fn new(commands_ch: Sender<GenericCommand<C>>) -> Self {
        Self { commands_ch }
    }

    pub async fn send_command(&self, command: C) -> io::Result<C::Response> {
        let (response_ch, response_rx) = oneshot::channel();
        let command = GenericCommand::new(command, response_ch);

        self.commands_ch
            .send(command)
            .map_err(|_| io::Error::other("Failed to send command"))?;

        response_rx
            .await
            .map_err(|_| io::Error::other("Failed to receive response"))?
    }
}
