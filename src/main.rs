mod commands;
mod core;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vaultkit")]
#[command(about = "Second Brain vault scaffolding and configuration tools", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Vault root (default: current directory)"
    )]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full bootstrap: folders, subfolders, projects, hotkeys, template paths
    Init,
    /// Create the base folder taxonomy
    CreateFolders,
    /// Create a project folder pair (prompts when NAME is omitted)
    CreateProject {
        name: Option<String>,
    },
    /// Create every project from the configured default list
    CreateDefaultProjects,
    CreateDefaultInputSubfolders,
    CreateDefaultOutputSubfolders,
    /// Point a base folder at a new path and rewrite dependent configs
    RenameFolder {
        #[arg(help = "input | output | task | outcome | extra | framework")]
        kind: String,
        new_path: String,
    },
    /// Merge the selector hotkeys into the host hotkeys registry
    AddHotkeys,
    /// Register template and script folders with the template engine
    AddTemplatePaths,
    Status {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
    /// Show the effective settings
    Settings {
        #[arg(long, help = "JSON output")]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let vault_root = match cli.vault {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init => commands::init::run(&vault_root),
        Commands::CreateFolders => commands::folders::run(&vault_root),
        Commands::CreateProject { name } => commands::project::run(&vault_root, name.as_deref()),
        Commands::CreateDefaultProjects => commands::project::run_defaults(&vault_root),
        Commands::CreateDefaultInputSubfolders => commands::subfolders::run_input(&vault_root),
        Commands::CreateDefaultOutputSubfolders => commands::subfolders::run_output(&vault_root),
        Commands::RenameFolder { kind, new_path } => {
            commands::rename::run(&vault_root, &kind, &new_path)
        }
        Commands::AddHotkeys => commands::hotkeys_cmd::run(&vault_root),
        Commands::AddTemplatePaths => commands::hotkeys_cmd::run_template_paths(&vault_root),
        Commands::Status { json } => commands::status::run(&vault_root, json),
        Commands::Settings { json } => commands::settings_cmd::run(&vault_root, json),
    }
}
