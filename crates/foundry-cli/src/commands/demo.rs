//! `foundry-agents demo` — the control-plane demo flow.
//!
//! Creates an agent, lists its versions, optionally sends it one test
//! message, and deletes it again. Workflow mode first registers the prompt
//! agent the workflow invokes by name.

use clap::{Args, ValueEnum};
use colored::Colorize;
use dialoguer::Confirm;

use foundry_core::{
    AgentKind, AgentStrategy, Credential, FoundryAgentStrategy, FoundryClient, FoundryConfig,
};

const INSTRUCTIONS: &str =
    "You are a helpful assistant. Answer the user's questions politely.";

#[derive(Args)]
pub struct DemoArgs {
    /// Run without confirmation prompts (answers yes).
    #[arg(long)]
    pub auto: bool,

    /// Agent backend to exercise.
    #[arg(long = "type", value_enum, default_value_t = DemoKind::Prompt)]
    pub kind: DemoKind,

    /// Leave the created agents behind.
    #[arg(long)]
    pub no_cleanup: bool,

    /// Agent name (a timestamp suffix is added in --auto mode).
    #[arg(long)]
    pub name: Option<String>,

    /// Message sent in the test step.
    #[arg(long, short, default_value = "Hello! Please introduce yourself.")]
    pub message: String,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoKind {
    /// Prompt-backed agent on the agent service.
    Prompt,
    /// Declarative workflow agent.
    Workflow,
}

pub async fn execute(args: DemoArgs, config: &FoundryConfig) -> anyhow::Result<()> {
    config.foundry.validate()?;
    let client = FoundryClient::new(&config.foundry.project_endpoint, Credential::from_env())?;

    let (kind, default_name, title) = match args.kind {
        DemoKind::Prompt => (AgentKind::AgentService, "demo-prompt-agent", "Agent service demo"),
        DemoKind::Workflow => (AgentKind::Workflow, "demo-workflow-agent", "Workflow agent demo"),
    };

    // Auto runs get a timestamp suffix so repeated runs never collide.
    let suffix = if args.auto {
        format!("-{}", chrono::Local::now().format("%H%M%S"))
    } else {
        String::new()
    };
    let agent_name = format!("{}{suffix}", args.name.as_deref().unwrap_or(default_name));

    let strategy = FoundryAgentStrategy::new(kind, client.clone(), &config.foundry.models);

    println!();
    println!("  {}", title.cyan().bold());
    println!();

    let mut created: Vec<String> = Vec::new();
    if let Err(error) = run_flow(&args, &strategy, &client, config, &agent_name, &mut created).await
    {
        eprintln!("  {} {error}", "✗".red().bold());

        let cleanup = if args.no_cleanup {
            false
        } else if args.auto {
            true
        } else {
            Confirm::new()
                .with_prompt("Delete the agents created so far?")
                .default(false)
                .interact()?
        };
        if cleanup {
            for name in created.iter().rev() {
                // Best effort; the original error is what gets surfaced.
                if strategy.delete_agent(name).await.is_ok() {
                    println!("  {} Removed {}", "✓".green(), name.cyan());
                }
            }
        }
        return Err(error);
    }

    println!();
    println!("  {}", "Done".green().bold());
    Ok(())
}

async fn run_flow(
    args: &DemoArgs,
    strategy: &FoundryAgentStrategy,
    client: &FoundryClient,
    config: &FoundryConfig,
    agent_name: &str,
    created: &mut Vec<String>,
) -> anyhow::Result<()> {
    // The sample workflow invokes `{agent_name}-prompt`, so register that
    // prompt agent before the workflow itself.
    if args.kind == DemoKind::Workflow {
        let prompt_name = format!("{agent_name}-prompt");
        println!("  {} Registering helper prompt agent...", "▸".yellow());
        let prompt_strategy = FoundryAgentStrategy::new(
            AgentKind::AgentService,
            client.clone(),
            &config.foundry.models,
        );
        let version = prompt_strategy.create_agent(&prompt_name, INSTRUCTIONS).await?;
        created.push(version.name.clone());
        println!(
            "  {} Registered {} v{}",
            "✓".green().bold(),
            version.name.cyan(),
            version.version
        );
        println!();
    }

    let instructions = match args.kind {
        DemoKind::Prompt => INSTRUCTIONS,
        // Empty instructions make the strategy fall back to the sample
        // workflow YAML.
        DemoKind::Workflow => "",
    };

    println!("  {} Create the agent", "1.".yellow());
    let version = strategy.create_agent(agent_name, instructions).await?;
    created.push(version.name.clone());
    println!("  {} Created", "✓".green().bold());
    println!("    Name:    {}", version.name.cyan());
    println!("    Version: {}", version.version);
    println!("    ID:      {}", version.id);
    println!();

    println!("  {} List agent versions", "2.".yellow());
    let versions = strategy.list_agent_versions(agent_name).await?;
    println!("  {} {} version(s)", "✓".green().bold(), versions.len());
    for v in &versions {
        println!("    - version {}, id {}", v.version, v.id);
    }
    println!();

    let run_test = args.auto
        || Confirm::new()
            .with_prompt("Run the agent?")
            .default(true)
            .interact()?;
    if run_test {
        println!("  {} Test the agent", "3.".yellow());
        let reply = strategy.test_agent(agent_name, &args.message).await?;
        print_panel("Agent reply", &reply);
        println!();
    }

    let delete = if args.no_cleanup {
        false
    } else if args.auto {
        true
    } else {
        Confirm::new()
            .with_prompt("Delete the created agents?")
            .default(true)
            .interact()?
    };
    if delete {
        println!("  {} Delete the agents", "4.".yellow());
        for name in created.iter().rev() {
            if strategy.delete_agent(name).await? {
                println!("  {} Deleted {}", "✓".green().bold(), name.cyan());
            } else {
                println!("  {} {} was already gone", "!".yellow(), name.cyan());
            }
        }
        created.clear();
    }

    Ok(())
}

fn print_panel(title: &str, body: &str) {
    println!("  {}", format!("── {title} {}", "─".repeat(40)).dimmed());
    for line in body.lines() {
        println!("  {line}");
    }
    println!("  {}", "─".repeat(44 + title.len()).dimmed());
}
