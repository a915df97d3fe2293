//! `foundry-agents hosted` — build, run, and invoke the hosted relay agent.
//!
//! The hosted agent is the `foundry-relay` binary: runnable directly for
//! local testing, packaged into a container for the agent service, and
//! reachable over A2A once deployed.

use std::process::Command as StdCommand;
use std::time::Duration;

use clap::Args;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use a2a_wire::A2AClient;
use foundry_core::FoundryConfig;

#[derive(Args)]
pub struct HostedArgs {
    /// Skip the menu and run the relay locally.
    #[arg(long)]
    pub auto: bool,

    /// Container image tag used for the Docker actions.
    #[arg(long, default_value = "foundry-relay:local")]
    pub image: String,
}

pub async fn execute(args: HostedArgs, config: &FoundryConfig) -> anyhow::Result<()> {
    println!();
    println!("  {}", "Hosted agent".blue().bold());
    println!();
    println!("  {}", "The hosted agent is the relay binary, packaged in stages:".dimmed());
    println!("    • {} serves the A2A and chat endpoints", "foundry-relay".cyan());
    println!("    • {} packages it for the agent service", "Docker".cyan());
    println!("    • {} runs it as a managed agent", "Foundry".cyan());
    println!();

    let choice = if args.auto {
        println!("  {}", "Selected: Run locally (no Docker)".dimmed());
        0
    } else {
        Select::new()
            .with_prompt("Action")
            .items(&[
                "Run locally (no Docker)",
                "Docker build & run",
                "Push image to a registry",
                "Invoke a deployed agent over A2A",
                "Back",
            ])
            .default(0)
            .interact()?
    };

    match choice {
        0 => run_local(config),
        1 => run_docker(&args.image, config),
        2 => push_image(&args.image),
        3 => invoke_agent(config).await,
        _ => Ok(()),
    }
}

/// Run the relay in-place with `cargo run`, blocking until it exits.
fn run_local(config: &FoundryConfig) -> anyhow::Result<()> {
    println!("  {} Starting the relay locally...", "▶".yellow());
    println!(
        "  {}",
        format!("http://localhost:{}/healthz", config.relay.port).dimmed()
    );
    println!("  {}", "Press Ctrl+C to stop".dimmed());
    println!();

    let status = StdCommand::new("cargo")
        .args(["run", "-p", "foundry-relay"])
        .env("AZURE_OPENAI_ENDPOINT", &config.openai.endpoint)
        .env("AZURE_OPENAI_DEPLOYMENT_NAME", &config.openai.deployment_name)
        .status()
        .map_err(|e| anyhow::anyhow!("failed to run cargo: {e}"))?;
    if !status.success() {
        anyhow::bail!("relay exited with {status}");
    }
    Ok(())
}

/// Build the container image and run it, publishing the relay port.
fn run_docker(image: &str, config: &FoundryConfig) -> anyhow::Result<()> {
    println!("  {} docker build -t {image} .", "▶".yellow());
    run_command("docker", &["build", "-t", image, "."])?;
    println!("  {} Image built", "✓".green().bold());
    println!();

    println!("  {} Starting the container...", "▶".yellow());
    println!("  {}", "Press Ctrl+C to stop".dimmed());
    let port = config.relay.port.to_string();
    let publish = format!("{port}:{port}");
    let endpoint_env = format!("AZURE_OPENAI_ENDPOINT={}", config.openai.endpoint);
    let deployment_env = format!(
        "AZURE_OPENAI_DEPLOYMENT_NAME={}",
        config.openai.deployment_name
    );
    run_command(
        "docker",
        &[
            "run", "--rm", "-p", &publish, "-e", &endpoint_env, "-e", &deployment_env, image,
        ],
    )
}

/// Tag and push the image to a registry the agent service can pull from.
fn push_image(image: &str) -> anyhow::Result<()> {
    let registry: String = Input::new()
        .with_prompt("Registry (e.g. myregistry.azurecr.io)")
        .interact_text()?;
    let remote = format!("{registry}/{}", image.replace(":local", ":latest"));

    if !Confirm::new()
        .with_prompt(format!("Push {remote}?"))
        .default(true)
        .interact()?
    {
        return Ok(());
    }

    run_command("docker", &["tag", image, &remote])?;
    run_command("docker", &["push", &remote])?;
    println!("  {} Pushed {}", "✓".green().bold(), remote.cyan());
    println!(
        "  {}",
        "Register the image as a hosted agent from the Foundry portal.".dimmed()
    );
    Ok(())
}

/// Discover a deployed agent's card and send it one message over A2A.
async fn invoke_agent(config: &FoundryConfig) -> anyhow::Result<()> {
    let endpoint: String = Input::new()
        .with_prompt("Agent endpoint")
        .default(config.relay.agent_url())
        .interact_text()?;
    let message: String = Input::new()
        .with_prompt("Message")
        .default("Hello! Please introduce yourself.".into())
        .interact_text()?;

    let mut client = A2AClient::new(&endpoint)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("  {spinner} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(120));

    spinner.set_message("Discovering agent card...");
    match client.discover().await {
        Ok(card) => spinner.println(format!("  {} {} ({endpoint})", "✓".green(), card.name)),
        // A missing card is not fatal; the message endpoint may still work.
        Err(e) => spinner.println(format!("  {} No agent card: {e}", "!".yellow())),
    }

    spinner.set_message("Sending message...");
    let reply = client.send_message_text(&message).await?;
    spinner.finish_and_clear();

    println!();
    println!("  {} {}", "Agent:".bold().cyan(), reply.text_content());
    Ok(())
}

fn run_command(program: &str, args: &[&str]) -> anyhow::Result<()> {
    let status = StdCommand::new(program)
        .args(args)
        .status()
        .map_err(|e| anyhow::anyhow!("failed to run {program}: {e}"))?;
    if !status.success() {
        anyhow::bail!("{program} exited with {status}");
    }
    Ok(())
}
