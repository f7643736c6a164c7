use std::fmt::Debug;
use std::sync::Arc;

use anyhow::Result;
use slackcommander_model::{ChannelId, CommandResponse, SlashRequest, UserId, UserName};

/// Business logic behind a single command.
///
/// Handlers run on a blocking thread pool, so they are free to do blocking I/O. Any plain
/// function or closure with a matching signature is a handler.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, args: &CommandArgs) -> Result<CommandResponse>;
}

impl<F> CommandHandler for F
where
    F: Fn(&CommandArgs) -> Result<CommandResponse> + Send + Sync,
{
    fn handle(&self, args: &CommandArgs) -> Result<CommandResponse> {
        self(args)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Handler result is the HTTP response.
    #[default]
    Sync,
    /// Request is acknowledged right away, result is posted to the response url.
    Async,
}

#[derive(Clone)]
pub struct CommandDef {
    handler: Arc<dyn CommandHandler>,
    mode: ExecutionMode,
    no_response: bool,
}

impl CommandDef {
    pub fn with_handler(handler: Arc<dyn CommandHandler>, mode: ExecutionMode) -> Self {
        Self {
            handler,
            mode,
            no_response: false,
        }
    }

    pub fn sync<F>(handler: F) -> Self
    where
        F: Fn(&CommandArgs) -> Result<CommandResponse> + Send + Sync + 'static,
    {
        Self::with_handler(Arc::new(handler), ExecutionMode::Sync)
    }

    pub fn asynchronous<F>(handler: F) -> Self
    where
        F: Fn(&CommandArgs) -> Result<CommandResponse> + Send + Sync + 'static,
    {
        Self::with_handler(Arc::new(handler), ExecutionMode::Async)
    }

    /// Marks the command as fire-and-forget: in async mode the handler result is never
    /// delivered and its errors are only logged. Sync commands ignore this flag.
    pub fn no_response(self) -> Self {
        Self {
            no_response: true,
            ..self
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn expects_response(&self) -> bool {
        !self.no_response
    }

    pub fn handle(&self, args: &CommandArgs) -> Result<CommandResponse> {
        self.handler.handle(args)
    }
}

impl Debug for CommandDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDef")
            .field("mode", &self.mode)
            .field("no_response", &self.no_response)
            .finish_non_exhaustive()
    }
}

/// Everything a handler gets to know about the request that invoked it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    pub user: UserName,
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub team_id: String,
    pub slash_command: String,
    /// First argument, or empty when the text had none.
    pub command: String,
    /// Command text after trimming and formatting removal.
    pub text: String,
    /// All arguments, including the command name.
    pub args: Vec<String>,
    pub response_url: String,
}

impl CommandArgs {
    pub(crate) fn new(request: SlashRequest, text: String, args: Vec<String>) -> Self {
        Self {
            user: request.user_name,
            user_id: request.user_id,
            channel_id: request.channel_id,
            channel_name: request.channel_name,
            team_id: request.team_id,
            slash_command: request.command,
            command: args.first().cloned().unwrap_or_default(),
            text,
            args,
            response_url: request.response_url,
        }
    }

    /// Arguments following the command name.
    pub fn params(&self) -> &[String] {
        self.args.get(1..).unwrap_or_default()
    }
}
