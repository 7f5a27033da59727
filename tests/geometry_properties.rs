//! Property tests for the geometry laws and the pixel stages built on them.

use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use imgr::imaging::transform::{clip, rotate};
use imgr::imaging::{Bounds, ClipRegion, Dimensions, Rotation, fit_within};
use proptest::prelude::*;

fn create_test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    }))
}

fn rotation_strategy() -> impl Strategy<Value = Rotation> {
    prop_oneof![
        Just(Rotation::None),
        Just(Rotation::Cw90),
        Just(Rotation::Cw180),
        Just(Rotation::Cw270),
    ]
}

/// Image size plus a region that lies inside it.
fn region_strategy() -> impl Strategy<Value = (u32, u32, u32, u32, u32, u32)> {
    (1u32..=48, 1u32..=48).prop_flat_map(|(w, h)| {
        (Just(w), Just(h), 0..w, 0..h).prop_flat_map(|(w, h, x1, y1)| {
            (Just(w), Just(h), Just(x1), Just(y1), (x1 + 1)..=w, (y1 + 1)..=h)
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn width_only_keeps_aspect_ratio(
        sw in 1u32..=8000,
        sh in 1u32..=8000,
        bw in 1i64..=8000,
    ) {
        let source = Dimensions::new(sw, sh);
        if let Ok(fit) = fit_within(source, Bounds::new(bw, 0).unwrap(), false) {
            prop_assert_eq!(fit.dimensions.width as i64, bw);
            let exact = bw as f64 * sh as f64 / sw as f64;
            prop_assert!((fit.dimensions.height as f64 - exact).abs() <= 1.0);
        }
    }

    #[test]
    fn height_only_keeps_aspect_ratio(
        sw in 1u32..=8000,
        sh in 1u32..=8000,
        bh in 1i64..=8000,
    ) {
        let source = Dimensions::new(sw, sh);
        if let Ok(fit) = fit_within(source, Bounds::new(0, bh).unwrap(), false) {
            prop_assert_eq!(fit.dimensions.height as i64, bh);
            let exact = bh as f64 * sw as f64 / sh as f64;
            prop_assert!((fit.dimensions.width as f64 - exact).abs() <= 1.0);
        }
    }

    #[test]
    fn box_fit_stays_inside_and_touches_an_edge(
        sw in 1u32..=8000,
        sh in 1u32..=8000,
        bw in 1i64..=4000,
        bh in 1i64..=4000,
    ) {
        let source = Dimensions::new(sw, sh);
        if let Ok(fit) = fit_within(source, Bounds::new(bw, bh).unwrap(), false) {
            let (w, h) = (fit.dimensions.width as i64, fit.dimensions.height as i64);
            prop_assert!(w <= bw && h <= bh, "{}x{} outside {}x{}", w, h, bw, bh);
            prop_assert!(w == bw || h == bh, "{}x{} touches no edge of {}x{}", w, h, bw, bh);
        }
    }

    #[test]
    fn no_enlarge_never_exceeds_source(
        sw in 1u32..=4000,
        sh in 1u32..=4000,
        bw in 0i64..=8000,
        bh in 0i64..=8000,
    ) {
        let source = Dimensions::new(sw, sh);
        if let Ok(fit) = fit_within(source, Bounds::new(bw, bh).unwrap(), true) {
            prop_assert!(fit.dimensions.width <= sw);
            prop_assert!(fit.dimensions.height <= sh);
            prop_assert_eq!(fit.resized, fit.dimensions != source);
        }
    }

    #[test]
    fn no_enlarge_is_identity_when_source_already_fits(
        sw in 1u32..=4000,
        sh in 1u32..=4000,
        extra_w in 0u32..=4000,
        extra_h in 0u32..=4000,
        width_only in any::<bool>(),
    ) {
        let source = Dimensions::new(sw, sh);
        let bh = if width_only { 0 } else { (sh + extra_h) as i64 };
        let bounds = Bounds::new((sw + extra_w) as i64, bh).unwrap();

        let fit = fit_within(source, bounds, true).unwrap();
        prop_assert_eq!(fit.dimensions, source);
        prop_assert!(!fit.resized);
    }

    #[test]
    fn resized_flag_matches_dimensions(
        sw in 1u32..=4000,
        sh in 1u32..=4000,
        bw in 0i64..=4000,
        bh in 0i64..=4000,
    ) {
        let source = Dimensions::new(sw, sh);
        if let Ok(fit) = fit_within(source, Bounds::new(bw, bh).unwrap(), false) {
            prop_assert_eq!(fit.resized, fit.dimensions != source);
        }
    }

    #[test]
    fn rotation_swaps_axes_for_quarter_turns(
        w in 1u32..=32,
        h in 1u32..=32,
        rotation in rotation_strategy(),
    ) {
        let rotated = rotate(create_test_image(w, h), rotation);
        let expected = rotation.apply_to(Dimensions::new(w, h));
        prop_assert_eq!(rotated.dimensions(), (expected.width, expected.height));
    }

    #[test]
    fn four_quarter_turns_are_identity(w in 1u32..=24, h in 1u32..=24) {
        let original = create_test_image(w, h);
        let mut image = original.clone();
        for _ in 0..4 {
            image = rotate(image, Rotation::Cw90);
        }
        prop_assert_eq!(image.to_rgba8().into_raw(), original.to_rgba8().into_raw());
    }

    #[test]
    fn opposite_rotations_cancel(w in 1u32..=24, h in 1u32..=24) {
        let original = create_test_image(w, h);
        let image = rotate(rotate(original.clone(), Rotation::Cw90), Rotation::Cw270);
        prop_assert_eq!(image.to_rgba8().into_raw(), original.to_rgba8().into_raw());
    }

    #[test]
    fn clip_extracts_exact_window((w, h, x1, y1, x2, y2) in region_strategy()) {
        let source = create_test_image(w, h);
        let region = ClipRegion::new(x1 as i64, y1 as i64, x2 as i64, y2 as i64).unwrap();
        let clipped = clip(source.clone(), region).unwrap();

        prop_assert_eq!(clipped.dimensions(), (x2 - x1, y2 - y1));
        prop_assert_eq!(clipped.get_pixel(0, 0), source.get_pixel(x1, y1));
        prop_assert_eq!(
            clipped.get_pixel(x2 - x1 - 1, y2 - y1 - 1),
            source.get_pixel(x2 - 1, y2 - 1)
        );
    }

    #[test]
    fn clip_past_the_edge_is_rejected(w in 1u32..=48, h in 1u32..=48, extra in 1u32..=16) {
        let region = ClipRegion::new(0, 0, (w + extra) as i64, h as i64).unwrap();
        prop_assert!(clip(create_test_image(w, h), region).is_err());
    }
}
