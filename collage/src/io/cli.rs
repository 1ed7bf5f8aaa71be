use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Segmentation mask of the silhouette (alpha channel, or luminance if the image has none)
    #[arg(short, long, value_name = "FILE")]
    pub mask: PathBuf,
    /// Folder with the images of the pool, fallback aspect ratios are used if absent
    #[arg(short, long, value_name = "FOLDER")]
    pub images: Option<PathBuf>,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(short, long, value_name = "N")]
    pub target_count: usize,
    #[arg(short, long, value_name = "FOLDER")]
    pub output_folder: PathBuf,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
}
