use std::sync::Arc;

use anyhow::{format_err, Context as _, Result};
use http::StatusCode;
use log::{debug, warn};
use slackcommander_model::{CommandResponse, SlashRequest};
use thiserror::Error;
use tokio::task::JoinError;

use crate::utils::{print_err, ResultExt as _};
use command::{CommandArgs, CommandDef, ExecutionMode};
use config::Config;
use delivery::Delivery;
use outcome::{outcome_channel, DispatchOutcome, OutcomeReceiver, OutcomeSender};
use registry::CommandRegistry;

pub mod command;
pub mod config;
pub mod delivery;
pub mod formatter;
pub mod outcome;
pub mod registry;
pub mod slack_api;
pub mod store;

pub const TOKEN_INVALID: &str = "Token invalid, contact an admin";
pub const PROVIDE_COMMAND: &str = "Provide a command";
pub const COMMAND_RECEIVED: &str = "Command received, wait for it...";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Token is missing! Set token first!")]
    MissingToken,
    #[error("Post token is missing! Set postToken to call the Slack Web API")]
    MissingPostToken,
}

/// What goes back to the chat platform in the webhook's HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: ReplyBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyBody {
    Text(String),
    Json(CommandResponse),
}

impl Reply {
    fn ok(text: impl Into<String>) -> Self {
        Reply {
            status: StatusCode::OK,
            body: ReplyBody::Text(text.into()),
        }
    }

    fn bad_request(text: impl Into<String>) -> Self {
        Reply {
            status: StatusCode::BAD_REQUEST,
            body: ReplyBody::Text(text.into()),
        }
    }

    /// Plain text responses are written as is, anything carrying more than text as JSON.
    fn from_response(response: CommandResponse) -> Self {
        let body = match response {
            CommandResponse::Text {
                response_type: None,
                text,
            } => ReplyBody::Text(text),
            response => ReplyBody::Json(response),
        };
        Reply {
            status: StatusCode::OK,
            body,
        }
    }

    pub fn text(&self) -> String {
        match &self.body {
            ReplyBody::Text(text) => text.clone(),
            ReplyBody::Json(response) => response.plain_text(),
        }
    }
}

/// Reply for the webhook request together with the signal of the whole dispatch finishing.
#[derive(Debug)]
pub struct Dispatch {
    pub reply: Reply,
    pub outcome: OutcomeReceiver,
}

/// Routes slash command requests to registered commands.
pub struct SlackMux {
    token: String,
    ignore_formatting: bool,
    registry: CommandRegistry,
    delivery: Arc<Delivery>,
}

impl SlackMux {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_delivery(config, Delivery::new(config.dry_run))
    }

    pub fn with_delivery(config: &Config, delivery: Delivery) -> Result<Self, ConfigError> {
        if config.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self {
            token: config.token.clone(),
            ignore_formatting: config.ignore_formatting,
            registry: CommandRegistry::new(),
            delivery: Arc::new(delivery),
        })
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }

    pub fn register_command(&self, name: impl Into<String>, def: CommandDef) {
        self.registry.register(name, def);
    }

    pub fn register_sync<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&CommandArgs) -> Result<CommandResponse> + Send + Sync + 'static,
    {
        self.register_command(name, CommandDef::sync(handler));
    }

    pub fn register_async<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&CommandArgs) -> Result<CommandResponse> + Send + Sync + 'static,
    {
        self.register_command(name, CommandDef::asynchronous(handler));
    }

    pub fn register_default(&self, def: CommandDef) {
        self.registry.register_default(def);
    }

    pub fn clear_commands(&self) {
        self.registry.clear();
    }

    /// Dispatches a raw `application/x-www-form-urlencoded` request body.
    pub async fn dispatch_form(&self, body: &[u8]) -> Dispatch {
        match serde_urlencoded::from_bytes::<SlashRequest>(body) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                debug!("Malformed request: {e}");
                let (sender, outcome) = outcome_channel();
                sender.publish(DispatchOutcome::Failure);
                Dispatch {
                    reply: Reply::bad_request(format!("Malformed request: {e}")),
                    outcome,
                }
            }
        }
    }

    pub async fn dispatch(&self, request: SlashRequest) -> Dispatch {
        let (sender, outcome) = outcome_channel();
        let reply = self.route(request, sender).await;
        Dispatch { reply, outcome }
    }

    async fn route(&self, request: SlashRequest, outcome: OutcomeSender) -> Reply {
        if request.token != self.token {
            warn!("Invalid token in request from {}", request.user_name);
            outcome.publish(DispatchOutcome::Failure);
            return Reply::bad_request(TOKEN_INVALID);
        }

        let text = self.prepare_text(&request.text).to_string();
        let args = match slackargs::parse_args(&text) {
            Ok(args) => args,
            Err(e) => {
                debug!("Cannot parse {text:?}: {e}");
                outcome.publish(DispatchOutcome::Failure);
                return Reply::bad_request(e.to_string());
            }
        };

        let name = args.first().cloned().unwrap_or_default();
        let Some(resolved) = self.registry.resolve(&name) else {
            if text.is_empty() {
                outcome.publish(DispatchOutcome::Failure);
                return Reply::bad_request(PROVIDE_COMMAND);
            }
            debug!("Unknown command {name:?} from {}", request.user_name);
            outcome.publish(DispatchOutcome::Rejected);
            return Reply::ok(format!("{name} is not a valid command."));
        };
        debug!(
            "{} invoked {name:?} (default: {})",
            request.user_name,
            resolved.is_default()
        );

        let definition = resolved.into_definition();
        let args = CommandArgs::new(request, text, args);
        match definition.mode() {
            ExecutionMode::Sync => {
                let reply = match run_handler(definition, args).await {
                    Ok(response) => Reply::from_response(response),
                    Err(e) => Reply::bad_request(format!("{e:#}")),
                };
                outcome.publish(DispatchOutcome::Success);
                reply
            }
            ExecutionMode::Async => {
                tokio::spawn(run_in_background(
                    definition,
                    args,
                    Arc::clone(&self.delivery),
                    outcome,
                ));
                Reply::ok(COMMAND_RECEIVED)
            }
        }
    }

    fn prepare_text<'a>(&self, text: &'a str) -> &'a str {
        let text = text.trim();
        if self.ignore_formatting {
            slackargs::strip_formatting(text).trim()
        } else {
            text
        }
    }
}

async fn run_handler(definition: Arc<CommandDef>, args: CommandArgs) -> Result<CommandResponse> {
    tokio::task::spawn_blocking(move || definition.handle(&args))
        .await
        .unwrap_or_else(|e| Err(handler_failure(e)))
}

fn handler_failure(e: JoinError) -> anyhow::Error {
    if e.is_panic() {
        format_err!("command handler panicked")
    } else {
        format_err!("command handler was cancelled")
    }
}

async fn run_in_background(
    definition: Arc<CommandDef>,
    args: CommandArgs,
    delivery: Arc<Delivery>,
    outcome: OutcomeSender,
) {
    let command = args.command.clone();
    let response_url = args.response_url.clone();
    let expects_response = definition.expects_response();
    let result = run_handler(definition, args).await;

    if !expects_response {
        // TODO: route these errors to a pluggable error sink once hosts need more than logs
        result
            .map(drop)
            .with_context(|| format!("Command {command:?} failed"))
            .print_err_info();
        return;
    }

    let response = formatter::format_result(result);
    let published = match delivery.deliver(&response, &response_url).await {
        Ok(()) => DispatchOutcome::Success,
        Err(e) => {
            print_err(&e);
            DispatchOutcome::Failure
        }
    };
    debug!("Command {command:?} finished: {published:?}");
    outcome.publish(published);
}
