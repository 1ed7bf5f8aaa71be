use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use afterimage::entities::ImageRef;
use afterimage::extraction::Mask;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::{LevelFilter, info, warn};
use serde::Serialize;
use svg::Document;

use crate::EPOCH;
use crate::config::CollageConfig;
use crate::io::output::ExtPoolImage;

pub mod cli;
pub mod output;

/// File extensions of images considered part of a pool
const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

pub fn read_config(path: &Path) -> Result<CollageConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let config: CollageConfig =
        serde_json::from_reader(reader).context("incorrect config file format")?;
    config.validate().context("invalid config")?;
    Ok(config)
}

/// Reads the opacity of every pixel of an image.
/// Uses the alpha channel if present, the luminance otherwise (white = opaque).
pub fn read_mask(path: &Path) -> Result<Mask> {
    let img = image::open(path)
        .with_context(|| format!("could not open mask: {}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let alpha = match img.color().has_alpha() {
        true => img.to_rgba8().pixels().map(|p| p.0[3]).collect_vec(),
        false => img.to_luma8().into_raw(),
    };
    info!(
        "[IO] read {width}x{height} mask from {} ({})",
        path.display(),
        if img.color().has_alpha() { "alpha" } else { "luminance" }
    );
    Mask::new(width, height, alpha)
}

/// Reads the dimensions of all images in `folder`, in file name order.
/// Files which cannot be decoded are skipped with a warning.
pub fn read_image_pool(folder: &Path) -> Result<Vec<ExtPoolImage>> {
    let paths: Vec<PathBuf> = fs::read_dir(folder)
        .with_context(|| format!("could not read image folder: {}", folder.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;

    let pool = paths
        .into_iter()
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        })
        .sorted()
        .filter_map(|path| match image::image_dimensions(&path) {
            Ok((width, height)) if width > 0 && height > 0 => Some((path, width, height)),
            Ok(_) => {
                warn!("[IO] skipping empty image {}", path.display());
                None
            }
            Err(err) => {
                warn!("[IO] skipping {}: {err}", path.display());
                None
            }
        })
        .enumerate()
        .map(|(id, (path, width, height))| ExtPoolImage {
            id,
            path,
            width,
            height,
        })
        .collect_vec();

    info!("[IO] image pool of {} images read from {}", pool.len(), folder.display());
    Ok(pool)
}

pub fn pool_refs(pool: &[ExtPoolImage]) -> Vec<ImageRef> {
    pool.iter()
        .map(|img| ImageRef::new(img.id, img.width, img.height))
        .collect()
}

pub fn write_json(json: &impl Serialize, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, json)
        .with_context(|| format!("could not write output file: {}", path.display()))?;

    info!("[IO] json written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("[IO] svg written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        // Add blanket level filter -
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    info!("[IO] start time: {}", jiff::Timestamp::now());
    Ok(())
}
