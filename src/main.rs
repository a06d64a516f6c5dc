use std::str::FromStr;

use clap::{Parser, Subcommand};
use medfolder_core::config::label_date_format_from_env_value;
use medfolder_core::constants::LABEL_DATE_FORMAT_ENV;
use medfolder_core::{
    ComponentId, CompositeNode, CoreConfig, Folder, HierarchySynthesizer, OrderedRecordIndex,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod samples;

#[derive(Parser)]
#[command(name = "medfolder")]
#[command(about = "Browse medical records as a folder hierarchy")]
struct Cli {
    /// strftime pattern for dates in folder labels (overrides MEDFOLDER_DATE_FORMAT)
    #[arg(long, global = true)]
    date_format: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build folders from the date-ordered record index (default)
    Bst {
        /// Only print the component with this id
        #[arg(long, value_parser = ComponentId::from_str)]
        focus: Option<ComponentId>,
    },
    /// Show the manually organised category folders
    Manual {
        /// Only print the component with this id
        #[arg(long, value_parser = ComponentId::from_str)]
        focus: Option<ComponentId>,
    },
    /// List the sample records in date order
    Records,
}

/// Entry point for the medfolder demo.
///
/// Builds one of the sample structures and prints its display projection as JSON on stdout.
/// Logs go to stderr.
///
/// # Environment Variables
/// - `MEDFOLDER_DATE_FORMAT`: strftime pattern for folder label dates (default: "%Y-%m-%d")
/// - `RUST_LOG`: log filter (default directive: "medfolder=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medfolder=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CoreConfig::new(resolve_label_date_format(cli.date_format)?)?;

    match cli.command.unwrap_or(Commands::Bst { focus: None }) {
        Commands::Bst { focus } => {
            let index = sample_index()?;
            let synthesizer = HierarchySynthesizer::new(config);
            let root = synthesizer.synthesize(&index);
            tracing::info!(
                records = index.len(),
                date_format = synthesizer.config().label_date_format(),
                "++ Built folder structure from record index"
            );
            print_structure(&root, focus.as_ref())?;
        }
        Commands::Manual { focus } => {
            let root = samples::manual_structure()?;
            tracing::info!(records = root.record_count(), "++ Built manual folder structure");
            print_structure(&root, focus.as_ref())?;
        }
        Commands::Records => {
            let index = sample_index()?;
            if index.is_empty() {
                println!("No records found.");
            }
            for record in &index {
                println!(
                    "{}  ID: {}, Patient: {}, Diagnosis: {}, Treatment: {}",
                    record.date.format(config.label_date_format()),
                    record.id,
                    record.patient_id,
                    record.diagnosis,
                    record.treatment
                );
            }
        }
    }

    Ok(())
}

/// The `--date-format` flag wins over `MEDFOLDER_DATE_FORMAT`; both are trimmed the same way.
fn resolve_label_date_format(flag: Option<String>) -> anyhow::Result<String> {
    let value = flag.or_else(|| std::env::var(LABEL_DATE_FORMAT_ENV).ok());
    Ok(label_date_format_from_env_value(value)?)
}

fn sample_index() -> anyhow::Result<OrderedRecordIndex> {
    Ok(samples::sample_records()?.into_iter().collect())
}

/// Print the display projection of `root`, or of the component identified by `focus`.
fn print_structure(root: &Folder, focus: Option<&ComponentId>) -> anyhow::Result<()> {
    let projection = match focus {
        None => root.display(),
        Some(id) if root.id() == id => root.display(),
        Some(id) => root
            .find(id)
            .map(CompositeNode::display)
            .ok_or_else(|| anyhow::anyhow!("no component with id '{id}'"))?,
    };

    tracing::debug!(
        id = %projection.id(),
        name = projection.name(),
        children = projection.children().len(),
        "printing component"
    );
    println!("{}", serde_json::to_string_pretty(&projection)?);
    Ok(())
}
