use clap::{Args, Parser};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "contract-scout")]
#[command(about = "Scrape verified smart contracts and flag the usable ones")]
pub struct Cli {
    /// Explorer API key (falls back to the POLYGON_API_KEY env var)
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub api_key: Option<String>,

    /// Save usable-contract rows to a csv file
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Query one or more specific contracts instead of the verified listing;
    /// requires one of -s -a -d -f -u
    #[arg(long = "contract", value_name = "ADDRESS", num_args = 1.., conflicts_with = "query")]
    pub contracts: Vec<String>,

    /// Only consider verified contracts whose source contains the given string
    #[arg(short = 'q', long, value_name = "STRING")]
    pub query: Option<String>,

    #[command(flatten)]
    pub mode: ModeFlags,
}

#[derive(Debug, Clone, Args)]
#[group(multiple = false)]
pub struct ModeFlags {
    /// Get source code for one or more contract addresses
    #[arg(short = 's', long)]
    pub source: bool,

    /// Get ABI for one or more contract addresses
    #[arg(short = 'a', long)]
    pub abi: bool,

    /// Get the description for one or more contract addresses
    #[arg(short = 'd', long)]
    pub description: bool,

    /// Get functions found in one or more contract's source code
    #[arg(short = 'f', long)]
    pub functions: bool,

    /// Return only contracts that have remaining mintable supply and aren't
    /// whitelist only
    #[arg(short = 'u', long)]
    pub usable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Inspect(InspectMode),
    Usable,
}

/// The print-only modes; usability classification is routed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectMode {
    Source,
    Abi,
    Description,
    Functions,
}

impl ModeFlags {
    pub fn mode(&self) -> Option<Mode> {
        if self.source {
            Some(Mode::Inspect(InspectMode::Source))
        } else if self.abi {
            Some(Mode::Inspect(InspectMode::Abi))
        } else if self.description {
            Some(Mode::Inspect(InspectMode::Description))
        } else if self.functions {
            Some(Mode::Inspect(InspectMode::Functions))
        } else if self.usable {
            Some(Mode::Usable)
        } else {
            None
        }
    }
}
