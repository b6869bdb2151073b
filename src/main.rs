use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use retrato::{
    Field, RacialGroup, RenderConfig, classify, execute_render, normalize,
    percentage_distribution, value_counts,
};

#[derive(Parser)]
#[command(name = "retrato")]
#[command(author, version, about = "Survey analysis and PDF report on perceptions of structural racism in the labor market", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write the PDF report
    Report {
        /// Input survey export (CSV)
        #[arg(short, long, default_value = "process_form_data.csv")]
        input: PathBuf,

        /// Output path for the report
        #[arg(short, long, default_value = "relatorio.pdf")]
        output: PathBuf,

        /// Directory with the LiberationSans TTF family (discovered when omitted)
        #[arg(long)]
        font_dir: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize the survey without producing a report
    Analyze {
        /// Input survey export (CSV)
        #[arg(short, long, default_value = "process_form_data.csv")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            output,
            font_dir,
            verbose,
        } => {
            setup_logging(verbose);
            generate_report(input, output, font_dir)
        }
        Commands::Analyze {
            input,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            analyze_survey(input, json)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn generate_report(input: PathBuf, output: PathBuf, font_dir: Option<PathBuf>) -> Result<()> {
    info!("Stage 0: Loading survey export from {:?}", input);
    let table = normalize(&input).context("Failed to load and normalize the survey export")?;

    info!("Stage 1: Classifying {} responses...", table.len());
    let classified = classify(table);

    info!("Stages 2-3: Aggregating and rendering report...");
    let config = RenderConfig {
        output_path: output,
        font_dir,
    };
    let result = execute_render(&classified, &config).context("Failed to render the report")?;

    info!(
        "Complete: {} sections ({} charts) written to {:?}",
        result.sections, result.charts_rendered, result.output_path
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct AnalysisSummary {
    respondents: usize,
    racial_groups: Vec<CountEntry>,
    age_brackets: Vec<CountEntry>,
    employed_pretos_e_pardos: Vec<ShareEntry>,
}

#[derive(Debug, Serialize)]
struct CountEntry {
    answer: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct ShareEntry {
    answer: String,
    percent: f64,
}

fn analyze_survey(input: PathBuf, json: bool) -> Result<()> {
    let table = normalize(&input).context("Failed to load and normalize the survey export")?;
    let classified = classify(table);

    let summary = AnalysisSummary {
        respondents: classified.len(),
        racial_groups: count_entries(value_counts(&classified, Field::GrupoRacial)),
        age_brackets: count_entries(value_counts(&classified, Field::FaixaEtaria)),
        employed_pretos_e_pardos: percentage_distribution(
            &classified,
            Field::InseridoMercadoTrabalho,
            |row| row.group == RacialGroup::PretosEPardos,
        )
        .into_iter()
        .map(|(answer, percent)| ShareEntry { answer, percent })
        .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Survey Analysis");
    println!("===============");
    println!("Respondents: {}", summary.respondents);
    println!();

    println!("Racial Groups");
    println!("-------------");
    for entry in &summary.racial_groups {
        println!("{}: {}", entry.answer, entry.count);
    }
    println!();

    println!("Age Brackets");
    println!("------------");
    for entry in &summary.age_brackets {
        println!("{}: {}", entry.answer, entry.count);
    }
    println!();

    println!("Employed (Pretos e Pardos)");
    println!("--------------------------");
    for entry in &summary.employed_pretos_e_pardos {
        println!("{}: {:.1}%", entry.answer, entry.percent);
    }

    Ok(())
}

fn count_entries(counts: Vec<(String, usize)>) -> Vec<CountEntry> {
    counts
        .into_iter()
        .map(|(answer, count)| CountEntry { answer, count })
        .collect()
}
