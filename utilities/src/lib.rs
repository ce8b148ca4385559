pub mod command_executor;
