mod cli;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use colored::*;
use screening_advisor::{
    catalog::Catalog,
    clock::{Clock, FixedClock, SystemClock},
    config::{Config, EngineConfig},
    error::{self, AdvisorError},
    member::MemberDirectory,
    report::{formatters::format_yes_no, render_report, ReportContext},
    screening::ScreeningEngine,
    utils,
};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("screening_advisor=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Evaluate {
            member,
            today,
            top,
            format,
            strict_history,
        } => {
            info!("Evaluating member: {}", member);
            evaluate_member(&config, &member, today, top, format, strict_history)
        }

        Commands::Report {
            member,
            today,
            top,
            output,
        } => {
            info!("Rendering report for: {}", member);
            render_member_report(&config, &member, today, top, output.as_deref())
        }

        Commands::Members => list_members(&config),

        Commands::Catalog { format } => show_catalog(&config, format),

        Commands::Check => check(&config),
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn build_engine(config: &Config, top: Option<usize>, strict_history: bool) -> error::Result<ScreeningEngine> {
    let catalog = Catalog::load(&config.data.catalog_path)?;
    let engine_config = EngineConfig {
        top_n: top.unwrap_or(config.engine.top_n),
        strict_history: strict_history || config.engine.strict_history,
    };
    Ok(ScreeningEngine::new(Arc::new(catalog), engine_config))
}

fn clock_for(today: Option<NaiveDate>) -> Box<dyn Clock> {
    match today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    }
}

fn evaluate_member(
    config: &Config,
    name: &str,
    today: Option<NaiveDate>,
    top: Option<usize>,
    format: OutputFormat,
    strict_history: bool,
) -> error::Result<()> {
    let engine = build_engine(config, top, strict_history)?;
    let member = MemberDirectory::load(&config.data.members_path)?.find(name)?;
    let today = clock_for(today).today();
    let result = engine.compute(&member, today)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", "=== Screening Eligibility ===".cyan().bold());
    println!(
        "Member: {}   Age: {}   Gender: {}   Diabetic: {}",
        member.name.bold(),
        member.age,
        member.gender,
        format_yes_no(member.diabetic)
    );
    println!("As of:  {}", today);

    utils::print_screening_bucket(
        &format!("Top {} Priority Screenings", engine.config().top_n),
        &result.priority,
    );
    utils::print_screening_bucket("Additional Available Screenings", &result.additional);
    utils::print_screening_bucket("Already Completed Screenings", &result.completed);

    if !result.rejected_history.is_empty() {
        println!("\n{}", "Skipped history entries:".yellow());
        for rejected in &result.rejected_history {
            println!("  - {}", rejected);
        }
    }

    Ok(())
}

fn render_member_report(
    config: &Config,
    name: &str,
    today: Option<NaiveDate>,
    top: Option<usize>,
    output: Option<&str>,
) -> error::Result<()> {
    let engine = build_engine(config, top, false)?;
    let member = MemberDirectory::load(&config.data.members_path)?.find(name)?;
    let result = engine.compute_with_clock(&member, clock_for(today).as_ref())?;

    let ctx = ReportContext {
        report: &config.report,
        clinic: &config.clinic,
        glossary: &config.glossary,
    };
    let text = render_report(&member, &result, &ctx)?;

    match output {
        Some(path) => {
            std::fs::write(path, &text)?;
            println!("{} {}", "✓ Report written to".green(), path);
        }
        None => print!("{}", text),
    }

    Ok(())
}

fn list_members(config: &Config) -> error::Result<()> {
    let directory = MemberDirectory::load(&config.data.members_path)?;

    println!("{}", "=== Members ===".cyan().bold());
    utils::print_table_border(70);
    utils::print_table_row(&["Name", "Age", "Gender", "Diabetic", "Status"], &[28, 5, 8, 9, 10]);
    utils::print_table_border(70);

    for (name, outcome) in directory.validate_all() {
        match outcome {
            Ok(member) => utils::print_table_row(
                &[
                    &member.name,
                    &member.age.to_string(),
                    &member.gender.to_string(),
                    format_yes_no(member.diabetic),
                    "OK",
                ],
                &[28, 5, 8, 9, 10],
            ),
            Err(e) => {
                warn!("{}", e);
                utils::print_table_row(&[&name, "-", "-", "-", "Invalid"], &[28, 5, 8, 9, 10]);
            }
        }
    }
    utils::print_table_border(70);

    Ok(())
}

fn show_catalog(config: &Config, format: OutputFormat) -> error::Result<()> {
    let catalog = Catalog::load(&config.data.catalog_path)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(catalog.rules())?);
        return Ok(());
    }

    println!("{}", "=== Screening Catalog ===".cyan().bold());
    utils::print_table_border(96);
    utils::print_table_row(
        &["Screening", "Ages", "Gender", "Diabetic", "Every (yrs)", "Importance"],
        &[36, 9, 8, 9, 11, 10],
    );
    utils::print_table_border(96);

    for rule in catalog.rules() {
        utils::print_table_row(
            &[
                &rule.name,
                &format!("{}-{}", rule.min_age, rule.max_age),
                &rule.gender.to_string(),
                if rule.diabetic_only { "Only" } else { "-" },
                &rule.refresh_years.to_string(),
                &rule.importance.to_string(),
            ],
            &[36, 9, 8, 9, 11, 10],
        );
    }
    utils::print_table_border(96);

    Ok(())
}

fn check(config: &Config) -> error::Result<()> {
    println!("{}", "✓ Configuration loaded".green());

    let catalog = Catalog::load(&config.data.catalog_path)?;
    println!("{} ({} rules)", "✓ Catalog valid".green(), catalog.len());

    let directory = MemberDirectory::load(&config.data.members_path)?;
    let invalid: Vec<String> = directory
        .validate_all()
        .into_iter()
        .filter_map(|(_, outcome)| outcome.err().map(|e| e.to_string()))
        .collect();

    if !invalid.is_empty() {
        for problem in &invalid {
            println!("  {} {}", "✗".red(), problem);
        }
        return Err(AdvisorError::Config(format!(
            "{} of {} member records are invalid",
            invalid.len(),
            directory.len()
        )));
    }

    println!("{} ({} members)", "✓ Member records valid".green(), directory.len());
    Ok(())
}
