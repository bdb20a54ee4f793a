use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sizetree")]
#[command(about = "Find the large files and folders under a directory", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory to inspect
    #[arg(default_value = ".")]
    pub path: String,

    /// Size threshold in MiB (blank means 1)
    #[arg(short = 't', long = "threshold", default_value = "")]
    pub threshold: String,

    /// Hide entries smaller than the threshold
    #[arg(long = "hide-small")]
    pub hide_small: bool,

    /// Do not mark entries at or over the threshold
    #[arg(long = "no-highlight")]
    pub no_highlight: bool,

    /// Print only N levels below the root (0 prints the root alone)
    #[arg(short = 'L', long = "level")]
    pub level: Option<usize>,

    /// Log more (repeat for trace output)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
