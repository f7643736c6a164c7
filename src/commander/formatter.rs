use anyhow::Result;
use log::warn;
use slackcommander_model::CommandResponse;

pub const ERROR_PREFIX: &str = "something went wrong - ";
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "Command finished without a response.";

/// Turns a handler result into the response that gets delivered to the user.
pub fn format_result(result: Result<CommandResponse>) -> CommandResponse {
    match result {
        Ok(response) if response.is_empty() => {
            // Handlers are expected to always say something
            warn!("Command handler returned an empty response");
            CommandResponse::simple_text(EMPTY_RESPONSE_PLACEHOLDER)
        }
        Ok(response) => response,
        Err(e) => error_response(&e),
    }
}

pub fn error_response(e: &anyhow::Error) -> CommandResponse {
    CommandResponse::simple_text(format!("{ERROR_PREFIX}{e:#}"))
}
