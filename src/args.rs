use clap::{Args, Parser};
use serde::{Deserialize, Serialize};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Input files
    #[clap(flatten)]
    pub input: InputConfig,

    /// Output method
    #[clap(flatten)]
    pub output: OutputConfig,

    /// Write diagnostics to this file instead of stderr
    #[clap(long)]
    pub log_file: Option<String>,

    /// Load input and output settings from a configuration file
    #[clap(long)]
    pub config_file: Option<String>,
}

#[derive(Args, Serialize, Deserialize, Debug, Clone)]
pub struct InputConfig {
    /// The lookup table, a CSV file with dstport, protocol and tag columns
    #[clap(long, default_value = "lookup.csv")]
    pub lookup: String,

    /// The flow log to classify
    #[clap(long, default_value = "flow_logs.txt")]
    pub flow_log: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            lookup: "lookup.csv".to_string(),
            flow_log: "flow_logs.txt".to_string(),
        }
    }
}

#[derive(Args, Serialize, Deserialize, Debug, Clone)]
pub struct OutputConfig {
    /// Output method
    #[clap(short, long, value_enum, default_value_t = ExportMethodType::File)]
    pub output: ExportMethodType,

    /// File path for the report (used if method is File)
    #[clap(long, default_value = "output.txt")]
    pub export_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output: ExportMethodType::File,
            export_path: "output.txt".to_string(),
        }
    }
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportMethodType {
    /// The report will be printed to the console
    Print,

    /// The report will be written to a file
    File,
}

/// The settings a configuration file may carry.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ConfigFile {
    pub input: InputConfig,
    pub output: OutputConfig,
}
