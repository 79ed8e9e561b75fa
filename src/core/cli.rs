use clap::{arg, command, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long)]
    pub configuration_file: Option<String>,
    #[arg(short, long)]
    pub verbosity: Option<log::LevelFilter>,
}

#[derive(Subcommand)]
pub enum Command {
    /// pushes hostname, tags and radio settings of every AP to its controllers
    Provision {
        /// render and log the documents without sending them
        #[arg(long)]
        dry_run: bool,
        /// write the run report as JSON to this file
        #[arg(long)]
        report: Option<String>,
    },
    /// checks the controllers hold what the inventory describes
    Validate {
        /// write the run report as JSON to this file
        #[arg(long)]
        report: Option<String>,
    },
    /// decodes an inventory rf channel value, e.g. 5g-36-5180-20
    Decode { value: String },
    /// encodes radio parameters into an inventory rf channel value
    Encode {
        /// 2.4g or 5g
        band: String,
        channel: u16,
        /// channel width in MHz
        width: u16,
    },
}
