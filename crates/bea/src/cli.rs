use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing.
    #[arg(short, long, global = true)]
    pub trace: Option<TraceLevel>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the datasets the BEA API serves.
    Datasets,

    /// Fetch rows from one dataset table, printed as JSON lines.
    Data {
        /// Dataset name, e.g. "Regional".
        #[arg(short, long)]
        dataset: String,

        /// Table within the dataset, e.g. "SQGDP2".
        #[arg(short = 'T', long)]
        table: Option<String>,

        /// Geography code, e.g. "STATE".
        #[arg(short, long)]
        geo: Option<String>,

        /// Years to fetch; each year is its own request.
        #[arg(short, long)]
        year: Vec<String>,

        /// Statistic line within the table.
        #[arg(short, long)]
        line_code: Option<String>,

        /// Extra query parameters, as KEY=VALUE.
        #[arg(short, long, value_parser = parse_key_value)]
        param: Vec<(String, String)>,

        /// Route the requests through the 100/minute budget.
        #[arg(long)]
        throttle: bool,
    },
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) => Ok((key.to_string(), value.to_string())),
        None => Err(format!("expected KEY=VALUE, got `{input}`")),
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
#[clap(rename_all = "UPPERCASE")]
pub enum TraceLevel {
    DEBUG,
    ERROR,
    INFO,
    TRACE,
    WARN,
}
