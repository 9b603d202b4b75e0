use bulletin::application::{
    init, manage_config::mask, manage_config::ConfigService, CycleService, ExportBundle,
    ExportService, RepairService, ReviewService, SectionService, SubmitService,
};
use bulletin::cli::{
    format_contributors, format_cycle_status, format_repair_plan, format_section_progress,
    format_stats, format_submission_list, Cli, Commands, RepairAction,
};
use bulletin::domain::{Category, CategoryKind, MonthKey};
use bulletin::error::{BulletinError, Result};
use bulletin::infrastructure::logging::init_tracing;
use bulletin::infrastructure::{
    AccessRole, FileSystemRepository, NewsletterRepository, SystemClock,
};
use clap::Parser;
use std::fs;
use std::path::Path;
use std::str::FromStr;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("{}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Discover the store and check the caller's secret for `role`
fn open(role: AccessRole, secret: Option<&str>) -> Result<FileSystemRepository> {
    let repo = FileSystemRepository::discover()?;
    repo.load_config()?.authorize(role, secret)?;
    Ok(repo)
}

/// Parse an explicit month, or fall back to the current collection month
fn month_or_current(repo: &FileSystemRepository, month: Option<String>) -> Result<MonthKey> {
    match month {
        Some(m) => MonthKey::parse(&m),
        None => CycleService::new(repo, SystemClock).current_collection_month(),
    }
}

fn category_opt(category: Option<String>) -> Result<Option<Category>> {
    category.as_deref().map(Category::from_str).transpose()
}

fn write_or_print(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            println!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let secret = cli.secret.as_deref();

    match cli.command {
        Commands::Init { path, deadline_day } => init::init(&path, deadline_day),
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("deadline-day = {}", service.get("deadline-day")?);
                println!("secrets.submit = {}", mask(config.secrets.submit.as_deref()));
                println!("secrets.editor = {}", mask(config.secrets.editor.as_deref()));
                println!("secrets.admin = {}", mask(config.secrets.admin.as_deref()));
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v, secret)?;
                    if k.starts_with("secrets.") {
                        println!("Set {}", k);
                    } else {
                        println!("Set {} = {}", k, v);
                    }
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: bulletin config [--list | <key> [<value>]]");
                println!(
                    "Valid keys: deadline-day, secrets.submit, secrets.editor, secrets.admin, created"
                );
            }
            Ok(())
        }
        Commands::Cycle => {
            let repo = FileSystemRepository::discover()?;
            let status = CycleService::new(&repo, SystemClock).status()?;
            print!("{}", format_cycle_status(&status));
            Ok(())
        }
        Commands::Submit {
            category,
            content,
            name,
        } => {
            let category = Category::from_str(&category)?;
            let repo = open(AccessRole::Submitter, secret)?;
            let submission =
                SubmitService::new(&repo, SystemClock).submit(category, &content, name.as_deref())?;
            println!(
                "Recorded {} for the {} issue",
                submission.id,
                submission.month.long_name()
            );
            Ok(())
        }
        Commands::List { month, category } => {
            let category = category_opt(category)?;
            let repo = open(AccessRole::Editor, secret)?;
            let month = month_or_current(&repo, month)?;
            let submissions = ReviewService::new(&repo).submissions_for_month(month, category)?;
            print!("{}", format_submission_list(&submissions));
            if submissions.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Backlog { category } => {
            let category = category_opt(category)?;
            let repo = open(AccessRole::Editor, secret)?;
            let submissions = ReviewService::new(&repo).backlog(category)?;
            print!("{}", format_submission_list(&submissions));
            if submissions.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Set { id, disposition } => {
            let repo = open(AccessRole::Editor, secret)?;
            let updated = ReviewService::new(&repo).set_disposition(&id, &disposition)?;
            println!("{} is now {}", updated.id, updated.disposition);
            Ok(())
        }
        Commands::Stats { month } => {
            let repo = open(AccessRole::Editor, secret)?;
            let month = month_or_current(&repo, month)?;
            let stats = ReviewService::new(&repo).stats(month)?;
            println!("{} issue", month.long_name());
            print!("{}", format_stats(&stats));
            Ok(())
        }
        Commands::Contributors { month } => {
            let repo = open(AccessRole::Editor, secret)?;
            let month = month_or_current(&repo, month)?;
            let names = ReviewService::new(&repo).contributors(month)?;
            print!("{}", format_contributors(&names));
            if names.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Draft { category, month } => {
            let category = Category::from_str(&category)?;
            let repo = open(AccessRole::Editor, secret)?;
            let month = month_or_current(&repo, month)?;
            let draft = SectionService::new(&repo, SystemClock).draft(category, month)?;
            println!("{}", draft);
            Ok(())
        }
        Commands::SaveDraft {
            category,
            file,
            complete,
        } => {
            let category = Category::from_str(&category)?;
            let repo = open(AccessRole::Editor, secret)?;
            let content = match file {
                Some(path) => fs::read_to_string(path)?,
                None => String::new(),
            };
            let progress =
                SectionService::new(&repo, SystemClock).save_section_draft(category, &content, complete)?;
            println!(
                "Saved {} ({})",
                category.display_name(),
                if progress.is_complete {
                    "complete"
                } else {
                    "in progress"
                }
            );
            Ok(())
        }
        Commands::Sections => {
            let repo = open(AccessRole::Editor, secret)?;
            let progress = SectionService::new(&repo, SystemClock).progress()?;
            print!("{}", format_section_progress(&progress));
            if progress.is_empty() {
                println!();
            }
            Ok(())
        }
        Commands::Export { month, output } => {
            let repo = open(AccessRole::Editor, secret)?;
            let month = month_or_current(&repo, month)?;
            let text = ExportService::new(&repo, SystemClock).export_text(month)?;
            write_or_print(output.as_deref(), &text)
        }
        Commands::ExportAll { output } => {
            let repo = open(AccessRole::Admin, secret)?;
            let bundle = ExportService::new(&repo, SystemClock).export_all()?;
            let mut json = bundle.to_json()?;
            json.push('\n');
            write_or_print(output.as_deref(), &json)
        }
        Commands::Import { file, yes } => {
            let repo = open(AccessRole::Admin, secret)?;
            let bundle = ExportBundle::from_json(&fs::read_to_string(&file)?)?;
            println!(
                "Import replaces all stored data with {} submission(s) and {} section(s)",
                bundle.submissions.len(),
                bundle.section_progress.len()
            );
            if !yes {
                return Err(BulletinError::Config(
                    "Refusing to run without --yes".to_string(),
                ));
            }

            let summary = ExportService::new(&repo, SystemClock).import(bundle)?;
            if let Some(backup) = summary.backup {
                println!("Backed up previous submissions to {}", backup);
            }
            println!(
                "Imported {} submission(s) and {} section(s)",
                summary.submissions, summary.sections
            );
            Ok(())
        }
        Commands::Repair {
            action,
            dry_run,
            yes,
        } => {
            let repo = open(AccessRole::Admin, secret)?;
            let mut service = RepairService::new(&repo, SystemClock);
            let plan = match action {
                RepairAction::RetargetPublished => service.plan_retarget_published()?,
                RepairAction::MoveMonth { from, to, kind } => {
                    let kind = kind
                        .as_deref()
                        .map(CategoryKind::from_str)
                        .transpose()?;
                    service.plan_move_month(MonthKey::parse(&from)?, MonthKey::parse(&to)?, kind)?
                }
            };

            print!("{}", format_repair_plan(&plan));
            if plan.is_empty() {
                println!();
                return Ok(());
            }
            if dry_run {
                println!("Dry run: nothing was changed");
                return Ok(());
            }
            if !yes {
                return Err(BulletinError::Config(
                    "Refusing to run without --yes".to_string(),
                ));
            }

            let report = service.apply(&plan)?;
            if let Some(backup) = report.backup {
                println!("Backed up previous submissions to {}", backup);
            }
            println!("Applied {} change(s)", report.applied);
            Ok(())
        }
    }
}
