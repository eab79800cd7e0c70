//! create-monorepo - Scaffold a client/server JavaScript monorepo

use anyhow::{Context, Result};
use clap::Parser;
use monorepo_core::tui::CreateArgs;
use monorepo_core::{ClientFramework, PackageManager, ServerFramework, Settings};

#[derive(Parser, Debug)]
#[command(name = "create-monorepo")]
#[command(about = "Scaffold a monorepo with a frontend and a backend wired together")]
#[command(version)]
pub struct Args {
    /// Package manager for the workspace (skips the prompt)
    #[arg(long = "package-manager", value_enum)]
    pub package_manager: Option<PackageManager>,

    /// Frontend framework (skips the prompt)
    #[arg(long, value_enum)]
    pub client: Option<ClientFramework>,

    /// Backend framework (skips the prompt)
    #[arg(long, value_enum)]
    pub server: Option<ServerFramework>,

    /// Project name / directory to create (skips the prompt)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Kill any generator running longer than this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip the Node.js / package manager check
    #[arg(long = "skip-checks")]
    pub skip_checks: bool,
}

impl From<&Args> for CreateArgs {
    fn from(args: &Args) -> Self {
        CreateArgs {
            package_manager: args.package_manager,
            client: args.client,
            server: args.server,
            name: args.name.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let base_dir = std::env::current_dir().context("Failed to read current directory")?;
    let settings = Settings::new(base_dir)
        .with_timeout(args.timeout)
        .with_skip_checks(args.skip_checks);

    let result = monorepo_core::run((&args).into(), &settings).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_is_fully_interactive() {
        let args = Args::parse_from(["create-monorepo"]);
        let create: CreateArgs = (&args).into();
        assert!(create.package_manager.is_none());
        assert!(create.client.is_none());
        assert!(create.server.is_none());
        assert!(create.name.is_none());
    }

    #[test]
    fn test_flags_prefill_answers() {
        let args = Args::parse_from([
            "create-monorepo",
            "--package-manager",
            "pnpm",
            "--client",
            "angular",
            "--server",
            "nestjs",
            "-n",
            "demo",
            "--timeout",
            "600",
        ]);
        let create: CreateArgs = (&args).into();
        assert_eq!(create.package_manager, Some(PackageManager::Pnpm));
        assert_eq!(create.client, Some(ClientFramework::Angular));
        assert_eq!(create.server, Some(ServerFramework::NestJS));
        assert_eq!(create.name.as_deref(), Some("demo"));
        assert_eq!(args.timeout, Some(600));
    }

    #[test]
    fn test_unknown_framework_rejected() {
        assert!(Args::try_parse_from(["create-monorepo", "--client", "svelte"]).is_err());
    }
}
