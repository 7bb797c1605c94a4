mod cli;
mod command;
mod feedback;
mod filters;
mod history;
mod links;
mod logging;
mod paths;
mod platform;
mod prefs;
mod session;
mod tools;
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{BaseAction, Cli, Commands, OpenArgs};
use dialoguer::theme::ColorfulTheme;
use feedback::Status;
use links::LinkOutcome;
use paths::Separator;
use prefs::Prefs;
use session::Session;
use std::io::IsTerminal;
use tools::{ToolConfig, ToolId};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let prefs_path = cli.prefs.clone().unwrap_or_else(prefs::default_path);
    let prefs = Prefs::load(&prefs_path)
        .with_context(|| format!("loading preferences from {}", prefs_path.display()))?;
    let mut session = Session::new(prefs);
    if let Some(base) = cli.base.as_deref() {
        session.override_base_path(base);
    }
    if cli.native_separators {
        session.override_separator(Separator::Native);
    }
    tracing::debug!(
        base = session.base_path(),
        separator = session.separator().as_str(),
        "session ready"
    );

    let command = match cli.command {
        Some(command) => command,
        None if std::io::stdin().is_terminal() => Commands::Interactive,
        None => bail!("no tool given; run `ffcmd --help` to list the subcommands"),
    };

    match command {
        Commands::Interactive => tui::run(&mut session),
        Commands::Base { action } => manage_base(&mut session, action.unwrap_or(BaseAction::Show)),
        Commands::Open(args) => open(&mut session, args),
        Commands::Tools { tool } => {
            list_tools(&session, tool);
            Ok(())
        }
        generator => {
            let Some(config) = generator.into_tool_config() else {
                bail!("unsupported command");
            };
            print_command(&mut session, config, cli.copy);
            Ok(())
        }
    }
}

fn print_command(session: &mut Session, config: ToolConfig, copy: bool) {
    session.apply(config);
    tracing::info!(tool = %session.active(), "generating command");
    if copy {
        let command = session.record_copy();
        println!("{command}");
        if platform::try_copy(&command) {
            feedback::announce(Status::Ok, "Copied command to clipboard!");
        } else {
            feedback::announce(Status::Warn, "Could not copy command; copy it manually.");
        }
    } else {
        println!("{}", session.command());
    }
}

fn manage_base(session: &mut Session, action: BaseAction) -> Result<()> {
    match action {
        BaseAction::Show => {
            match session.base_path() {
                "" => println!("(no base path set)"),
                base => println!("{base}"),
            }
            println!("separator: {}", session.separator().as_str());
            println!("saved in: {}", session.prefs().path().display());
        }
        BaseAction::Set { path } => {
            session.set_base_path(&path)?;
            println!("{}", session.base_path());
        }
        BaseAction::Clear => session.set_base_path("")?,
        BaseAction::Separator { value } => {
            let Some(separator) = Separator::parse(&value) else {
                bail!("unknown separator `{value}` (backslash|native)");
            };
            session.set_separator(separator)?;
        }
    }
    Ok(())
}

fn open(session: &mut Session, args: OpenArgs) -> Result<()> {
    if args.copy_url {
        if !platform::try_copy(&args.url) {
            println!("{}", args.url);
        }
        return Ok(());
    }

    let interactive = std::io::stdin().is_terminal();
    let outcome = links::follow(
        session.prefs_mut(),
        &args.url,
        |url| {
            if args.yes {
                Ok(true)
            } else if interactive {
                tui::external_link_notice(&ColorfulTheme::default(), url)
            } else {
                Ok(false)
            }
        },
        platform::open_url,
    )?;

    match outcome {
        LinkOutcome::Opened => {}
        LinkOutcome::Unopened | LinkOutcome::Declined => println!("{}", args.url),
    }
    Ok(())
}

fn list_tools(session: &Session, tool: Option<ToolId>) {
    match tool {
        Some(tool) => {
            println!("{} - {}\n", tool.label(), tool.description());
            println!(
                "{}",
                command::generate(&ToolConfig::default_for(tool), &session.resolver())
            );
        }
        None => {
            for tool in ToolId::ALL {
                println!("{:<14} {:<16} {}", tool, tool.label(), tool.description());
            }
        }
    }
}
