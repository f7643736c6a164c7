pub mod api;
pub mod commander;
pub mod logging;
pub mod utils;

pub use commander::command::{CommandArgs, CommandDef, CommandHandler, ExecutionMode};
pub use commander::config::Config;
pub use commander::outcome::{DispatchOutcome, OutcomeReceiver};
pub use commander::{ConfigError, Dispatch, Reply, ReplyBody, SlackMux};
pub use slackcommander_model as model;
