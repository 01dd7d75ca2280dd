use clap::Parser;

use crate::view::ViewOption;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML
    #[arg(long, default_value = "config.toml")]
    pub config: String,

    /// Run without GUI: render the figure to files and print the UK table
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Initial view (overrides config)
    #[arg(long, value_enum)]
    pub view: Option<ViewOption>,

    /// Render every view (headless only)
    #[arg(long, default_value_t = false)]
    pub all_views: bool,

    /// Output directory for rendered figures (overrides config)
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Output image format for headless rendering
    #[arg(long, default_value = "png", value_parser = ["png", "svg"])]
    pub format: String,

    /// UK usage-vs-depression CSV (overrides config)
    #[arg(long)]
    pub uk_csv: Option<String>,

    /// US depression-by-year CSV (overrides config)
    #[arg(long)]
    pub us_csv: Option<String>,
}
