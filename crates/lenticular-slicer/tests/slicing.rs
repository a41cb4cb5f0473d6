//! End-to-end slicing behaviour.

use image::{Rgba, RgbaImage};
use lenticular_core::{Color, VerticalAlignment};
use lenticular_slicer::{ImageSlicer, SliceError, SliceGeometry, SliceParams};
use proptest::prelude::*;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn params(aspect: f64, count: usize) -> SliceParams {
    SliceParams {
        target_aspect_ratio: aspect,
        slice_count: count,
        border_color: Color::BLUE,
        vertical_alignment: VerticalAlignment::MIDDLE,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_wide_target_pads_left_and_right() {
    let image = RgbaImage::from_pixel(800, 600, RED);
    let mut slicer = ImageSlicer::new();
    let views = slicer.slice(&image, &params(1.5, 9)).unwrap();

    assert_eq!(views.len(), 9);
    let canvas = slicer.canvas();
    assert_eq!(canvas.image().dimensions(), (900, 600));
    let geometry = canvas.geometry().unwrap();
    assert_eq!(geometry.left_pad, 50);

    for (i, view) in views.iter().enumerate() {
        assert!((view.offset[0] - i as f64 / 9.0).abs() < 1e-12);
        assert_eq!(view.offset[1], 0.0);
        assert!((view.repeat[0] - 1.0 / 9.0).abs() < 1e-12);
        assert_eq!(view.repeat[1], 1.0);
    }

    let blue = Rgba([0, 0, 255, 255]);
    assert_eq!(canvas.image().get_pixel(49, 300), &blue);
    assert_eq!(canvas.image().get_pixel(50, 300), &RED);
    assert_eq!(canvas.image().get_pixel(849, 300), &RED);
    assert_eq!(canvas.image().get_pixel(850, 300), &blue);
}

#[test]
fn test_narrow_target_crops_centre() {
    let mut image = RgbaImage::from_pixel(103, 50, RED);
    // columns 0 and 102 are cut away by the crop to 100 columns
    for y in 0..50 {
        image.put_pixel(0, y, Rgba([0, 255, 0, 255]));
        image.put_pixel(102, y, Rgba([0, 255, 0, 255]));
    }
    let mut slicer = ImageSlicer::new();
    slicer.slice(&image, &params(1.0, 4)).unwrap();

    let canvas = slicer.canvas();
    assert_eq!(canvas.image().dimensions(), (100, 100));
    let geometry = canvas.geometry().unwrap();
    assert_eq!(geometry.left_clip, 1);
    assert_eq!(geometry.top_pad, 25);
    for x in 0..100 {
        assert_eq!(canvas.image().get_pixel(x, 25), &RED);
    }
    assert_eq!(canvas.image().get_pixel(0, 24), &Rgba([0, 0, 255, 255]));
    assert_eq!(canvas.image().get_pixel(0, 75), &Rgba([0, 0, 255, 255]));
}

#[test]
fn test_matching_aspect_keeps_every_row() {
    // 103 columns do not divide into 4 slices; no row may be lost to the crop
    let image = RgbaImage::from_pixel(103, 50, RED);
    let mut slicer = ImageSlicer::new();
    let views = slicer.slice(&image, &params(103.0 / 50.0, 4)).unwrap();
    assert_eq!(views.len(), 4);

    let canvas = slicer.canvas();
    let geometry = canvas.geometry().unwrap();
    assert_eq!(geometry.width, 104);
    assert_eq!(geometry.height, 50);
    assert_eq!(geometry.top_pad, 0);
    for y in 0..50 {
        assert_eq!(canvas.image().get_pixel(50, y), &RED);
    }
}

#[test]
fn test_reslicing_invalidates_old_views() {
    let image = RgbaImage::from_pixel(64, 32, RED);
    let mut slicer = ImageSlicer::new();
    let first = slicer.slice(&image, &params(2.5, 4)).unwrap();
    let second = slicer.slice(&image, &params(2.5, 4)).unwrap();

    let canvas = slicer.canvas();
    assert_eq!(
        canvas.resolve(&first[0]),
        Err(SliceError::StaleView {
            view: 1,
            canvas: 2,
        })
    );
    assert!(canvas.resolve(&second[0]).is_ok());
    for (a, b) in first.iter().zip(&second) {
        assert!(a.same_window(b));
    }
}

#[test]
fn test_slicing_is_deterministic() {
    let mut image = RgbaImage::new(40, 30);
    for (x, y, pixel) in image.enumerate_pixels_mut() {
        *pixel = Rgba([x as u8, y as u8, 7, 255]);
    }
    let mut a = ImageSlicer::new();
    let mut b = ImageSlicer::new();
    a.slice(&image, &params(2.0, 5)).unwrap();
    b.slice(&image, &params(2.0, 5)).unwrap();
    a.slice(&image, &params(2.0, 5)).unwrap();
    assert_eq!(a.canvas().image(), b.canvas().image());
}

// ---------------------------------------------------------------------------
// The canvas always divides into equal strips
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_slices_partition_canvas(
        width in 1u32..2000,
        height in 1u32..2000,
        aspect in 0.1f64..10.0,
        count in 1usize..40,
        align in 0.0f64..=1.0,
    ) {
        let alignment = VerticalAlignment::new(align).unwrap();
        match SliceGeometry::compute(width, height, aspect, count, alignment) {
            Ok(g) => {
                prop_assert_eq!(g.slice_width as u64 * count as u64, g.width as u64);
                prop_assert!(g.height >= height);
                prop_assert!(g.top_pad + height <= g.height);
                prop_assert!(g.left_pad + g.image_width <= g.width);
                let last = g.slice_rect(count - 1);
                prop_assert_eq!(last.x + last.width, g.width);
                let border: u64 = g.border_rects().iter().map(|r| r.area()).sum();
                prop_assert_eq!(border + g.interior().area(), g.width as u64 * g.height as u64);
            }
            Err(SliceError::SourceTooNarrow { .. }) => prop_assert!((width as usize) < count),
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }
}
