//! Charm-style CLI prompts using cliclack

use crate::choice::{ClientFramework, PackageManager, ScaffoldChoice, ServerFramework};
use crate::config::Settings;
use crate::provision::{self, ProvisionReport};
use crate::runtime::{check, SystemRunner};
use crate::validate::{resolve_project_dir, validate_project_name};
use crate::{summary, workspace};
use anyhow::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Answers supplied up front; each one skips its prompt
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub package_manager: Option<PackageManager>,
    pub client: Option<ClientFramework>,
    pub server: Option<ServerFramework>,
    pub name: Option<String>,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs, settings: &Settings) -> Result<()> {
    cliclack::intro("create-monorepo")?;

    // Step 1: Collect choices
    let choice = collect_choice(&args, &settings.base_dir)?;
    let root = resolve_project_dir(&choice.project_name, &settings.base_dir);

    // Step 2: Make sure the tooling is there before touching the filesystem
    if settings.skip_checks {
        cliclack::log::info("Skipping runtime checks")?;
    } else {
        check_runtimes(choice.package_manager)?;
    }

    let runner = SystemRunner::new(settings.generator_timeout);

    // Step 3: Workspace root
    cliclack::log::step(format!(
        "Initializing {} workspace in {}",
        choice.package_manager,
        root.display()
    ))?;
    workspace::initialize(&runner, &choice, &root).await?;

    // Step 4: Apps
    cliclack::log::step(format!("Creating {} client", choice.client))?;
    let client = provision::provision_client(&runner, &choice, &root).await?;
    report_provision("client", &client)?;

    cliclack::log::step(format!("Creating {} server", choice.server))?;
    let server = provision::provision_server(&runner, &choice, &root).await?;
    report_provision("server", &server)?;

    // Step 5: Summary
    print_next_steps(&choice)?;

    Ok(())
}

fn collect_choice(args: &CreateArgs, base: &Path) -> Result<ScaffoldChoice> {
    let package_manager = pick(
        "Select a package manager",
        "Package manager",
        args.package_manager,
        &PackageManager::ALL,
    )?;
    let client = pick(
        "Select a frontend framework",
        "Frontend",
        args.client,
        &ClientFramework::ALL,
    )?;
    let server = pick(
        "Select a backend framework",
        "Backend",
        args.server,
        &ServerFramework::ALL,
    )?;
    let project_name = select_project_name(args.name.as_deref(), base)?;

    Ok(ScaffoldChoice {
        package_manager,
        client,
        server,
        project_name,
    })
}

fn pick<T>(prompt: &str, label: &str, preset: Option<T>, options: &[T]) -> Result<T>
where
    T: Clone + Eq + fmt::Display,
{
    if let Some(value) = preset {
        cliclack::log::info(format!("{}: {}", label, value))?;
        return Ok(value);
    }

    let mut select = cliclack::select(prompt);
    for option in options {
        select = select.item(option.clone(), option.to_string(), "");
    }
    Ok(select.interact()?)
}

fn select_project_name(preset: Option<&str>, base: &Path) -> Result<String> {
    // Nobody to re-prompt when the name came from a flag
    if let Some(name) = preset {
        validate_project_name(name, base)?;
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.to_string());
    }

    let base: PathBuf = base.to_path_buf();
    let name: String = cliclack::input("Project name")
        .placeholder("my-app")
        .validate(move |input: &String| {
            validate_project_name(input, &base)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;

    Ok(name)
}

fn check_runtimes(pm: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    match check::check_runtimes(pm) {
        Ok(runtimes) => {
            let runtime_info: Vec<String> = runtimes
                .iter()
                .map(|r| format!("{} ({})", r.name, r.version.as_deref().unwrap_or("unknown")))
                .collect();
            spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));

            if let Some(node) = runtimes.iter().find(|r| r.name == "Node.js") {
                if let Some(warning) = check::node_version_warning(node) {
                    cliclack::log::warning(warning)?;
                }
            }
            Ok(())
        }
        Err(e) => {
            spinner.stop("Missing runtimes");
            cliclack::log::error(format!("{}", e))?;
            anyhow::bail!("Please install the missing runtimes and try again.");
        }
    }
}

fn report_provision(app: &str, report: &ProvisionReport) -> Result<()> {
    if !report.relocated {
        cliclack::log::warning(format!(
            "The {} generator did not create a '{}' directory",
            app, app
        ))?;
    }

    for warning in report.warnings() {
        cliclack::log::warning(warning.to_string())?;
    }

    cliclack::log::success(format!(
        "Created {} files in {}",
        report.file_count,
        report.app_dir.display()
    ))?;

    Ok(())
}

fn print_next_steps(choice: &ScaffoldChoice) -> Result<()> {
    cliclack::note("Project structure", summary::project_tree(choice))?;

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in summary::next_steps(choice).iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Monorepo created. Happy coding!")?;

    Ok(())
}
