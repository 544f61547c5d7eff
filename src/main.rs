use std::path::PathBuf;

use chrono::Month;
use clap::{Parser, ValueEnum};
use eyre::WrapErr;
use stock_view::{
    config::ViewerConfig,
    loader::{CsvFileLoader, RecordLoader},
    model::Company,
    publisher::ViewPublisher,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Format {
    /// Chart payload
    Json,
    /// One tooltip line per record
    Table,
}

#[derive(Parser)]
#[command(name = "stock-view")]
#[command(about = "Filter daily stock prices by company and month", long_about = None)]
struct Cli {
    /// CSV with Date, Company, Open and Close columns
    csv: PathBuf,

    #[arg(long, value_parser = parse_company)]
    company: Option<Company>,

    #[arg(long, value_parser = parse_month)]
    month: Option<Month>,

    /// JSON viewer config
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn parse_company(s: &str) -> Result<Company, String> {
    s.parse().map_err(|e: eyre::Report| e.to_string())
}

fn parse_month(s: &str) -> Result<Month, String> {
    s.parse().map_err(|_| format!("unknown month `{s}`"))
}

fn main() -> eyre::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ViewerConfig::from_json_file(path)?,
        None => ViewerConfig::default(),
    };

    let mut publisher = ViewPublisher::new(&config);
    if let Some(company) = cli.company {
        publisher.company_changed(company);
    }
    if let Some(month) = cli.month {
        publisher.month_changed(month);
    }

    let ticket = publisher.begin_upload();
    let records = CsvFileLoader::new(&cli.csv, config)
        .load()
        .wrap_err("upload failed")?;
    publisher.complete_upload(ticket, records);

    let view = publisher.active_view();
    match cli.format {
        Format::Json => println!("{}", view.to_chart_json()?),
        Format::Table => {
            for record in view.iter() {
                println!("{record}");
            }
        }
    }

    Ok(())
}
