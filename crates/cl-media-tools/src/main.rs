//! `clmt` - CLI for cl-media-tools
//!
//! Registers the version handler on its channel and drives it from the
//! command line.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde_json::{json, Value};
use tracing::info;

use cl_media_tools::cli::{CallCommand, Cli, Command, ConfigCommand, ServeCommand};
use cl_media_tools::plugin::plugin_handler;
use cl_media_tools::{
    init_logging, register_with, serve_lines, ChannelName, ChannelRegistry, Config, HostPlatform,
    MethodCall, MethodResponse,
};

/// The method is not implemented on the channel.
const EXIT_NOT_IMPLEMENTED: u8 = 2;
/// The handler replied with an error envelope.
const EXIT_ERROR_REPLY: u8 = 3;
/// Nothing is registered on the channel.
const EXIT_NO_HANDLER: u8 = 4;
/// `config validate` rejected the file.
const EXIT_INVALID_CONFIG: u8 = 1;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Execute the command. Config commands load (or refuse to load)
    // configuration themselves so a broken file can still be inspected.
    let config_path = cli.config;
    match cli.command {
        Command::Call(call_cmd) => handle_call(&Config::load_from(config_path)?, &call_cmd),
        Command::Serve(serve_cmd) => handle_serve(&Config::load_from(config_path)?, &serve_cmd),
        Command::Status(status_cmd) => {
            handle_status(&Config::load_from(config_path)?, status_cmd.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(config_cmd) => handle_config(config_path, config_cmd),
    }
}

/// Registry with the plugin bound, plus the channel calls should target.
fn setup(
    config: &Config,
    channel: Option<&str>,
) -> anyhow::Result<(ChannelRegistry, ChannelName)> {
    let mut registry = ChannelRegistry::default();
    let registered = register_with(&mut registry, config)?;

    // An explicit --channel may name a channel nothing listens on
    let target = match channel {
        Some(name) => ChannelName::new(name)?,
        None => registered,
    };
    Ok((registry, target))
}

fn handle_call(config: &Config, cmd: &CallCommand) -> anyhow::Result<ExitCode> {
    let (registry, channel) = setup(config, cmd.channel.as_deref())?;

    let args = match cmd.args.as_deref() {
        Some(raw) => serde_json::from_str(raw).context("--args is not valid JSON")?,
        None => Value::Null,
    };
    let call = MethodCall::new(cmd.method.as_str()).with_args(args);

    let response = match registry.channel(channel.clone()).invoke_method(&call) {
        Ok(response) => response,
        Err(err) if err.is_no_handler() => {
            eprintln!("{err}");
            return Ok(ExitCode::from(EXIT_NO_HANDLER));
        }
        Err(err) => return Err(err.into()),
    };

    if cmd.json {
        let reply = match &response {
            MethodResponse::Success(value) => value.clone(),
            MethodResponse::Error {
                code,
                message,
                details,
            } => json!({ "code": code, "message": message, "details": details }),
            MethodResponse::NotImplemented => Value::Null,
        };
        let report = json!({
            "channel": channel.as_str(),
            "method": call.method,
            "kind": response.kind(),
            "reply": reply,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let code = match response {
        MethodResponse::Success(value) => {
            if !cmd.json {
                match value {
                    Value::String(text) => println!("{text}"),
                    other => println!("{other}"),
                }
            }
            ExitCode::SUCCESS
        }
        MethodResponse::NotImplemented => {
            if !cmd.json {
                println!("not implemented: {}", call.method);
            }
            ExitCode::from(EXIT_NOT_IMPLEMENTED)
        }
        MethodResponse::Error { code, message, .. } => {
            if !cmd.json {
                eprintln!("{code}: {}", message.unwrap_or_default());
            }
            ExitCode::from(EXIT_ERROR_REPLY)
        }
    };
    Ok(code)
}

fn handle_serve(config: &Config, cmd: &ServeCommand) -> anyhow::Result<ExitCode> {
    let (registry, channel) = setup(config, cmd.channel.as_deref())?;

    // One call at a time, in order
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("failed to build tokio runtime")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = runtime.block_on(serve_lines(&registry, &channel, stdin, tokio::io::stdout()));

    match result {
        Ok(stats) => {
            info!(
                total = stats.total(),
                succeeded = stats.succeeded,
                not_implemented = stats.not_implemented,
                failed = stats.failed,
                "serve finished"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_no_handler() => {
            eprintln!("{err}");
            Ok(ExitCode::from(EXIT_NO_HANDLER))
        }
        Err(err) => Err(err.into()),
    }
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let channel = config.channel_name()?;
    let handler = plugin_handler(config);
    let host = handler.host();

    if json {
        let status = json!({
            "channel": channel.as_str(),
            "platform": host.platform_name(),
            "os_version": host.os_version(),
            "platform_version": handler.platform_version(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("clmt status");
        println!("-----------");
        println!("Channel:          {channel}");
        println!("Platform:         {}", host.platform_name());
        println!("OS version:       {}", host.os_version());
        println!("Platform version: {}", handler.platform_version());
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Channel]");
                println!("  Name:               {}", config.channel.name);
                println!();
                println!("[Host]");
                println!(
                    "  Platform name:      {}",
                    config.host.platform_name.as_deref().unwrap_or("(native)")
                );
                println!(
                    "  OS version:         {}",
                    config.host.os_version.as_deref().unwrap_or("(native)")
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if let Err(e) = Config::load_from(Some(path)) {
                eprintln!("Configuration error: {e}");
                return Ok(ExitCode::from(EXIT_INVALID_CONFIG));
            }
            println!("Configuration is valid.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
