use std::future::Future;
use std::pin::Pin;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use log::{error, info};
use slackcommander::commander::slack_api::SlackApi;
use slackcommander::commander::store;
use slackcommander::model::{Attachment, CommandResponse};
use slackcommander::utils::{print_err, unwrap_or_def_verbose, ResultExt as _};
use slackcommander::{api, logging, CommandDef, Config, SlackMux};
use tokio::runtime::Handle;
use tokio::signal;

/// Commands talking to the Slack Web API, available once a post token is configured.
fn register_web_api_commands(mux: &SlackMux, config: &Config) {
    let api = match SlackApi::new(mux.delivery().client().clone(), config) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            info!("Web API commands disabled: {e}");
            return;
        }
    };
    let runtime = Handle::current();

    mux.register_async("members", {
        let api = Arc::clone(&api);
        let runtime = runtime.clone();
        move |args| {
            let members = runtime.block_on(api.channel_members(&args.channel_id))?;
            let names = members.iter().map(|m| m.as_str()).collect::<Vec<_>>();
            Ok(CommandResponse::simple_text(format!(
                "Members of #{}: {}",
                args.channel_name,
                names.join(", ")
            )))
        }
    });
    mux.register_command(
        "say",
        CommandDef::asynchronous(move |args| {
            runtime.block_on(api.send_callback(&args.params().join(" "), &args.channel_id))?;
            Ok(CommandResponse::text("sent"))
        })
        .no_response(),
    );
}

fn register_commands(mux: &SlackMux) {
    mux.register_sync("echo", |args| {
        Ok(CommandResponse::text(args.params().join(" ")))
    });
    mux.register_async("greet", |args| {
        let who = args.params().first().cloned().unwrap_or_else(|| args.user.to_string());
        Ok(CommandResponse::simple_text(format!("Hello, {who}!")))
    });
    mux.register_default(CommandDef::sync(|args| {
        Ok(CommandResponse::text(format!(
            "I don't know what {:?} means, try `{} help`",
            args.command, args.slash_command
        )))
    }));

    // Registered last so the listing includes everything above
    let mut names = mux.registry().command_names();
    names.push("help".into());
    mux.register_sync("help", move |_| {
        let listing = names
            .iter()
            .map(|name| format!("• {name}"))
            .collect::<Vec<_>>()
            .join("\n");
        Ok(CommandResponse::with_attachments(vec![Attachment::new(listing)
            .title("Available commands")
            .color("good")])
        .markdown(true))
    });
}

async fn terminate_on_signal() -> Result<()> {
    let interrupt_signal: Pin<Box<dyn Future<Output = _> + Send>> = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::interrupt())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    let terminate_signal = Box::pin(async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to register terminate signal handlers!")?
            .recv()
            .await;
        Ok(())
    });
    futures_util::future::select_all([interrupt_signal, terminate_signal])
        .await
        .0
}

#[tokio::main]
async fn main() -> ExitCode {
    let _logger = logging::init()
        .inspect_err(|e| eprintln!("Logging disabled: {e:#}"))
        .ok();
    let config = unwrap_or_def_verbose(store::load_config());
    let mux = match SlackMux::new(&config) {
        Ok(mux) => Arc::new(mux),
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    register_web_api_commands(&mux, &config);
    register_commands(&mux);

    let shutdown = async {
        terminate_on_signal().await.print_err();
        info!("Terminating.");
    };
    match api::serve(mux, &config, shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_err(&e);
            ExitCode::FAILURE
        }
    }
}
