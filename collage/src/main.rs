use std::fs;
use std::path::Path;

use afterimage::geometry::primitives::Rect;
use afterimage::io::svg::collage_to_svg;
use afterimage::io::{export_contour, export_placed_rect};
use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use collage::config::CollageConfig;
use collage::io::cli::Cli;
use collage::io::output::CollageOutput;
use collage::pipeline::CapturePipeline;
use collage::{EPOCH, io};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match &args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            CollageConfig::default()
        }
        Some(config_file) => io::read_config(config_file)?,
    };
    info!("[MAIN] Successfully parsed CollageConfig: {config:?}");

    let mask_stem = args
        .mask
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid mask file name: {}", args.mask.display()))?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!(
                "could not create output folder: {}",
                args.output_folder.display()
            )
        })?;
    }

    let mask = io::read_mask(&args.mask)?;
    let pool = match &args.images {
        Some(folder) => io::read_image_pool(folder)?,
        None => {
            warn!("[MAIN] No image folder provided, using fallback aspect ratios");
            vec![]
        }
    };

    let mut rng = match config.prng_seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let pipeline = CapturePipeline::new(config);
    let result = pipeline.run(Some(&mask), &io::pool_refs(&pool), args.target_count, &mut rng);

    {
        let output = CollageOutput {
            mask: args.mask.clone(),
            target_count: args.target_count,
            images: pool,
            contours: result.shape.contours().iter().map(export_contour).collect(),
            placed: result.placed.iter().map(export_placed_rect).collect(),
            utilization: result.utilization,
            run_time_ms: EPOCH.elapsed().as_millis() as u64,
            config,
        };
        let json_path = args.output_folder.join(format!("collage_{mask_stem}.json"));
        io::write_json(&output, Path::new(&json_path))?;
    }

    {
        let canvas = Rect::try_new(0.0, 0.0, mask.width() as f32, mask.height() as f32).ok();
        let svg = collage_to_svg(
            &result.shape,
            result.shape_info.as_ref(),
            &result.placed,
            canvas,
            config.svg_draw_options,
            mask_stem,
        );
        let svg_path = args.output_folder.join(format!("collage_{mask_stem}.svg"));
        io::write_svg(&svg, Path::new(&svg_path))?;
    }

    Ok(())
}
