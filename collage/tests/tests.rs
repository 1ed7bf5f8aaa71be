#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use afterimage::entities::ImageRef;
    use afterimage::extraction::Mask;
    use afterimage::geometry::primitives::Point;
    use afterimage::util::assertions;
    use collage::config::CollageConfig;
    use collage::io;
    use collage::pipeline::{CapturePipeline, CaptureResult};
    use float_cmp::approx_eq;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use test_case::test_case;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Opaque axis-aligned rectangle on a transparent canvas
    fn rect_mask(canvas: (usize, usize), x: usize, y: usize, w: usize, h: usize) -> Mask {
        Mask::from_fn(canvas.0, canvas.1, |px, py| {
            match (x..x + w).contains(&px) && (y..y + h).contains(&py) {
                true => 255,
                false => 0,
            }
        })
    }

    /// Head and torso, roughly
    fn body_mask() -> Mask {
        Mask::from_fn(640, 480, |px, py| {
            let (x, y) = (px as f32, py as f32);
            let head = (x - 320.0).powi(2) + (y - 100.0).powi(2) <= 55.0f32.powi(2);
            let torso = ((x - 320.0) / 150.0).powi(2) + ((y - 300.0) / 160.0).powi(2) <= 1.0;
            match head || torso {
                true => 255,
                false => 0,
            }
        })
    }

    /// Head and torso, the torso running off the bottom of the frame
    fn framed_body_mask() -> Mask {
        Mask::from_fn(640, 480, |px, py| {
            let (x, y) = (px as f32, py as f32);
            let head = (x - 320.0).powi(2) + (y - 100.0).powi(2) <= 55.0f32.powi(2);
            let torso = (180..460).contains(&px) && py >= 150;
            match head || torso {
                true => 255,
                false => 0,
            }
        })
    }

    fn image_pool() -> Vec<ImageRef> {
        vec![
            ImageRef::new(0, 1920, 1080),
            ImageRef::new(1, 1080, 1350),
            ImageRef::new(2, 800, 800),
            ImageRef::new(3, 600, 900),
        ]
    }

    fn assert_valid_collage(result: &CaptureResult, config: &CollageConfig) {
        let placed = &result.placed;
        assert!(assertions::rects_are_contained(&result.shape, placed));
        assert!(assertions::rects_are_disjoint(placed));
        assert!(assertions::rects_are_spaced(placed, config.packing.min_spacing));
        assert!(assertions::aspect_ratios_are_preserved(placed));
        let min_area = config.packing.validity().min_area;
        assert!(placed.iter().all(|p| p.area() >= min_area));
    }

    #[test_case(0; "seed 0")]
    #[test_case(1; "seed 1")]
    #[test_case(42; "seed 42")]
    fn rectangle_silhouette(seed: u64) {
        init_logger();
        let mask = rect_mask((640, 480), 220, 40, 200, 400);
        let config = CollageConfig::default();
        let pipeline = CapturePipeline::new(config);
        let mut rng = SmallRng::seed_from_u64(seed);

        let result = pipeline.run(Some(&mask), &[], 6, &mut rng);

        assert_eq!(result.shape.contours().len(), 1);
        assert!((1..=6).contains(&result.placed.len()));
        assert_valid_collage(&result, &config);
    }

    #[test_case(10; "10 images")]
    #[test_case(25; "25 images")]
    #[test_case(60; "60 images")]
    fn body_silhouette_with_image_pool(target_count: usize) {
        init_logger();
        let mask = body_mask();
        let config = CollageConfig::default();
        let pipeline = CapturePipeline::new(config);
        let mut rng = SmallRng::seed_from_u64(0);
        let images = image_pool();

        let result = pipeline.run(Some(&mask), &images, target_count, &mut rng);

        assert!(!result.is_empty());
        assert!(result.placed.len() <= target_count);
        assert_valid_collage(&result, &config);
        for p_rect in &result.placed {
            let image = p_rect.image.expect("every rect has an image assigned");
            assert!(approx_eq!(
                f32,
                p_rect.width() / p_rect.height(),
                image.aspect_ratio(),
                epsilon = 1e-3
            ));
        }
    }

    #[test_case(0; "seed 0")]
    #[test_case(5; "seed 5")]
    fn body_cut_off_by_the_frame(seed: u64) {
        init_logger();
        let mask = framed_body_mask();
        let config = CollageConfig::default();
        let pipeline = CapturePipeline::new(config);
        let mut rng = SmallRng::seed_from_u64(seed);

        let result = pipeline.run(Some(&mask), &image_pool(), 20, &mut rng);

        assert!(result.shape.contains(&Point(320.0, 350.0)));
        let info = result.shape_info.as_ref().unwrap();
        assert!(info.total_area > 0.8 * 280.0 * 330.0);
        assert!(result.placed.len() >= 5);
        assert_valid_collage(&result, &config);

        let covered = result.placed.iter().map(|p| p.area()).sum::<f32>() / info.total_area;
        assert!(approx_eq!(f32, result.utilization, covered, epsilon = 1e-4));
        assert!(result.utilization > 0.0 && result.utilization <= 1.0);
    }

    #[test]
    fn crowded_shape_degrades_gracefully() {
        init_logger();
        let mask = rect_mask((320, 320), 100, 100, 120, 120);
        let config = CollageConfig::default();
        let pipeline = CapturePipeline::new(config);
        let mut rng = SmallRng::seed_from_u64(3);

        let result = pipeline.run(Some(&mask), &[], 30, &mut rng);

        assert!(result.placed.len() < 30);
        assert_valid_collage(&result, &config);
    }

    #[test]
    fn degenerate_input_yields_nothing() {
        init_logger();
        let pipeline = CapturePipeline::new(CollageConfig::default());
        let mut rng = SmallRng::seed_from_u64(0);

        let no_mask = pipeline.run(None, &image_pool(), 10, &mut rng);
        assert!(no_mask.is_empty() && no_mask.shape.is_empty());
        assert!(no_mask.shape_info.is_none());
        assert_eq!(no_mask.utilization, 0.0);

        let transparent = Mask::from_fn(200, 200, |_, _| 0);
        assert!(pipeline.run(Some(&transparent), &[], 10, &mut rng).is_empty());

        let zero_sized = Mask::new(0, 0, vec![]).unwrap();
        assert!(pipeline.run(Some(&zero_sized), &[], 10, &mut rng).is_empty());

        let mask = rect_mask((640, 480), 220, 40, 200, 400);
        let nothing_requested = pipeline.run(Some(&mask), &[], 0, &mut rng);
        assert!(nothing_requested.is_empty());
        assert!(nothing_requested.shape_info.is_some());
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let mask = body_mask();
        let pipeline = CapturePipeline::new(CollageConfig::default());
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            pipeline.run(Some(&mask), &image_pool(), 20, &mut rng).placed
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn optimizer_can_be_disabled() {
        let mask = body_mask();
        let mut config = CollageConfig::default();
        config.packing.optimize = false;
        let pipeline = CapturePipeline::new(config);
        let mut rng = SmallRng::seed_from_u64(11);

        let result = pipeline.run(Some(&mask), &[], 20, &mut rng);
        assert!(!result.is_empty());
        assert_valid_collage(&result, &config);
    }

    #[test]
    fn masks_and_pools_are_read_from_disk() {
        let folder = std::env::temp_dir().join(format!("collage_io_test_{}", std::process::id()));
        let pool_folder = folder.join("pool");
        fs::create_dir_all(&pool_folder).unwrap();

        let mask_path = folder.join("silhouette.png");
        image::RgbaImage::from_fn(64, 48, |x, _| match x < 32 {
            true => image::Rgba([0, 0, 0, 255]),
            false => image::Rgba([0, 0, 0, 0]),
        })
        .save(&mask_path)
        .unwrap();

        let luma_path = folder.join("luma.png");
        image::GrayImage::from_fn(10, 20, |_, y| image::Luma([(y * 10) as u8]))
            .save(&luma_path)
            .unwrap();

        image::RgbImage::new(30, 20)
            .save(pool_folder.join("b.png"))
            .unwrap();
        image::RgbImage::new(10, 40)
            .save(pool_folder.join("a.jpg"))
            .unwrap();
        fs::write(pool_folder.join("notes.txt"), "not an image").unwrap();

        let mask = io::read_mask(&mask_path).unwrap();
        assert_eq!((mask.width(), mask.height()), (64, 48));
        assert_eq!((mask.alpha(0, 0), mask.alpha(63, 47)), (255, 0));

        let luma = io::read_mask(&luma_path).unwrap();
        assert_eq!(luma.alpha(5, 19), 190);

        let pool = io::read_image_pool(&pool_folder).unwrap();
        let names: Vec<PathBuf> = pool.iter().map(|img| img.path.clone()).collect();
        assert_eq!(names, vec![pool_folder.join("a.jpg"), pool_folder.join("b.png")]);
        assert_eq!((pool[0].id, pool[0].width, pool[0].height), (0, 10, 40));
        assert_eq!(io::pool_refs(&pool)[1].aspect_ratio(), 1.5);

        assert!(io::read_mask(&folder.join("missing.png")).is_err());
        fs::remove_dir_all(&folder).unwrap();
    }
}
