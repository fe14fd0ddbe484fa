// Alignment search tests: offset recovery, tie-breaking, white backfill.

use image::{Rgba, RgbaImage};

use pdf_diff::compare::align::{best_offset, composite_onto_white};
use pdf_diff::compare::pixel::diff_pixel_count;

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

fn white_page(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(WHITE))
}

fn draw_block(img: &mut RgbaImage, x0: u32, y0: u32, width: u32, height: u32, color: [u8; 4]) {
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            img.put_pixel(x, y, Rgba(color));
        }
    }
}

/// A 20x20 square at (10,10) in A and (12,10) in B: the search must find
/// the (-2, 0) translation and the aligned pair must diff to zero.
#[test]
fn test_recovers_horizontal_shift() {
    let mut a = white_page(100, 100);
    let mut b = white_page(100, 100);
    draw_block(&mut a, 10, 10, 20, 20, BLACK);
    draw_block(&mut b, 12, 10, 20, 20, BLACK);

    let offset = best_offset(&a, &b, 3, 50).unwrap();
    assert_eq!((offset.dx, offset.dy), (-2, 0));
    assert_eq!(offset.diff_pixels, 0);
}

/// Diagonal shift within the radius is recovered exactly.
#[test]
fn test_recovers_diagonal_shift() {
    let mut a = white_page(80, 80);
    let mut b = white_page(80, 80);
    draw_block(&mut a, 30, 40, 15, 10, BLACK);
    draw_block(&mut b, 28, 43, 15, 10, BLACK);

    let offset = best_offset(&a, &b, 3, 50).unwrap();
    assert_eq!((offset.dx, offset.dy), (2, -3));
    assert_eq!(offset.diff_pixels, 0);
}

/// Radius 0 must reduce to the plain pixel comparison at (0, 0).
#[test]
fn test_radius_zero_is_plain_comparison() {
    let mut a = white_page(50, 50);
    let mut b = white_page(50, 50);
    draw_block(&mut a, 5, 5, 10, 10, BLACK);
    draw_block(&mut b, 7, 5, 10, 10, BLACK);

    let offset = best_offset(&a, &b, 0, 50).unwrap();
    assert_eq!((offset.dx, offset.dy), (0, 0));
    assert_eq!(
        offset.diff_pixels,
        diff_pixel_count(&a, &b, 50).unwrap()
    );
}

/// When every offset scores equally (blank pages), the first offset in
/// scan order wins: dy ascending then dx ascending from (-R, -R).
#[test]
fn test_tie_break_keeps_first_scanned_offset() {
    let a = white_page(40, 40);
    let b = white_page(40, 40);

    let offset = best_offset(&a, &b, 2, 120).unwrap();
    assert_eq!((offset.dx, offset.dy), (-2, -2));
    assert_eq!(offset.diff_pixels, 0);
}

/// Shifting exposes border area that must be backfilled with opaque white.
#[test]
fn test_composite_backfills_white() {
    let src = RgbaImage::from_pixel(4, 4, Rgba(BLACK));
    let shifted = composite_onto_white(&src, 4, 4, 2, 0);

    // Left two columns exposed, right two columns covered by src.
    for y in 0..4 {
        assert_eq!(shifted.get_pixel(0, y).0, WHITE);
        assert_eq!(shifted.get_pixel(1, y).0, WHITE);
        assert_eq!(shifted.get_pixel(2, y).0, BLACK);
        assert_eq!(shifted.get_pixel(3, y).0, BLACK);
    }
}

/// Compositing with (0, 0) onto a larger canvas is white padding.
#[test]
fn test_composite_pads_to_larger_canvas() {
    let src = RgbaImage::from_pixel(3, 2, Rgba(BLACK));
    let padded = composite_onto_white(&src, 5, 4, 0, 0);

    assert_eq!(padded.dimensions(), (5, 4));
    assert_eq!(padded.get_pixel(2, 1).0, BLACK);
    assert_eq!(padded.get_pixel(3, 0).0, WHITE);
    assert_eq!(padded.get_pixel(0, 2).0, WHITE);
}

/// Pixels shifted past the canvas edge are discarded, not wrapped.
#[test]
fn test_composite_discards_out_of_bounds() {
    let mut src = white_page(4, 4);
    draw_block(&mut src, 3, 3, 1, 1, BLACK);
    let shifted = composite_onto_white(&src, 4, 4, 1, 1);

    // The black pixel left the canvas entirely.
    for (_, _, px) in shifted.enumerate_pixels() {
        assert_eq!(px.0, WHITE);
    }
}
