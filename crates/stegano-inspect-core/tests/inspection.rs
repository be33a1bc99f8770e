use std::fs;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use stegano_inspect_core::session::read_range;
use stegano_inspect_core::{
    ColorMode, ContainerFormat, DumpWindow, InspectError, Inspection, PatternQuery,
};
use tempfile::TempDir;

/// 10x10 image where each pixel carries its coordinates: (x, y, x + y)
fn prepare_10x10_coordinates_image() -> RgbImage {
    ImageBuffer::from_fn(10, 10, |x, y| Rgb([x as u8, y as u8, (x + y) as u8]))
}

fn write_image(dir: &TempDir, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).expect("Cannot write test image");
    path
}

fn le_u32_at(path: &Path, offset: usize) -> usize {
    let bytes = fs::read(path).unwrap();
    u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap()) as usize
}

#[test]
fn should_inspect_a_png_carrier() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.png", &prepare_10x10_coordinates_image());
    let inspection = Inspection::open(&path).unwrap();

    let descriptor = inspection.descriptor().unwrap();
    assert_eq!((descriptor.width, descriptor.height), (10, 10));
    assert_eq!(descriptor.color_mode, ColorMode::Rgb);
    assert_eq!(descriptor.bytes_per_pixel, 3);

    let idat = inspection.search_hex("49 44 41 54").unwrap();
    let estimate = inspection.estimate();
    assert_eq!(estimate.format, ContainerFormat::Png);
    assert_eq!(estimate.data_start_offset, idat[0] + 8);

    let pixel = inspection.pixel(2, 3).unwrap();
    assert_eq!(pixel.channel_values, vec![2, 3, 5]);
    let expected = estimate.data_start_offset + (3 * 10 + 2) * 3;
    let expected = (expected < inspection.bytes().len()).then_some(expected);
    assert_eq!(pixel.file_offset, expected);
}

#[test]
fn should_map_bmp_pixels_from_the_header_offset() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.bmp", &prepare_10x10_coordinates_image());
    let inspection = Inspection::open(&path).unwrap();

    let data_start = le_u32_at(&path, 10);
    assert_eq!(inspection.estimate().format, ContainerFormat::Bmp);
    assert_eq!(inspection.estimate().data_start_offset, data_start);

    let pixel = inspection.pixel(0, 0).unwrap();
    assert_eq!(pixel.file_offset, Some(data_start));
    let last = inspection.pixel(9, 9).unwrap();
    assert_eq!(last.channel_values, vec![9, 9, 18]);
}

#[test]
fn should_inspect_a_grayscale_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gray.png");
    GrayImage::from_pixel(6, 6, Luma([0x80])).save(&path).unwrap();
    let inspection = Inspection::open(&path).unwrap();

    let pixel = inspection.pixel(5, 5).unwrap();
    assert_eq!(pixel.color_mode, ColorMode::Gray);
    assert_eq!(pixel.bytes_per_pixel, 1);
    assert_eq!(pixel.channel_values, vec![0x80]);
}

#[test]
fn should_estimate_jpeg_offsets_after_the_start_of_scan() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.jpg", &prepare_10x10_coordinates_image());
    let inspection = Inspection::open(&path).unwrap();

    let sos = inspection.search_hex("FF DA").unwrap();
    assert_eq!(inspection.estimate().format, ContainerFormat::Jpeg);
    assert_eq!(inspection.estimate().data_start_offset, sos[0] + 12);
    assert_eq!(inspection.search_hex("FF D8 FF").unwrap()[0], 0);
}

#[test]
fn should_reject_pixels_outside_of_the_image() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.png", &prepare_10x10_coordinates_image());
    let inspection = Inspection::open(&path).unwrap();

    assert!(matches!(
        inspection.pixel(10, 0),
        Err(InspectError::CoordinateOutOfRange { .. })
    ));
    assert!(matches!(
        inspection.jump_to_pixel(0, 10, 1024),
        Err(InspectError::CoordinateOutOfRange { .. })
    ));
}

#[test]
fn should_dump_and_search_files_that_are_no_images() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("payload.bin");
    let mut content = b"hidden\0\0".to_vec();
    content.extend_from_slice(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]);
    fs::write(&path, &content).unwrap();

    let inspection = Inspection::open(&path).unwrap();
    assert!(inspection.descriptor().is_none());
    assert!(matches!(
        inspection.pixel(0, 0),
        Err(InspectError::InvalidImageMedia)
    ));

    let dump = inspection.dump(DumpWindow::default());
    assert!(dump.starts_with("Hex view of payload.bin\n"));
    assert!(dump.contains("Showing 14 bytes"));
    assert!(dump.contains("Found ZIP/JAR archive signature at offset +8 (0x00000008)"));

    let query: PatternQuery = "50 4B".parse().unwrap();
    assert_eq!(inspection.search(&query), vec![8]);
}

#[test]
fn should_highlight_and_jump_to_a_bmp_pixel() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.bmp", &prepare_10x10_coordinates_image());
    let inspection = Inspection::open(&path).unwrap();
    let offset = inspection.pixel(1, 0).unwrap().file_offset.unwrap();

    let window = inspection.jump_to_pixel(1, 0, 256).unwrap().unwrap();
    assert_eq!(window, DumpWindow::around(offset, 256));

    let region = inspection
        .highlight_pixel(1, 0, &window)
        .unwrap()
        .expect("jump window shows the pixel");
    let relative = offset - window.start_offset;
    assert_eq!(region.row, relative / 16);
    assert_eq!(region.start_column, relative % 16);
    assert_eq!(region.cells.len(), 3.min(16 - relative % 16));

    let elsewhere = DumpWindow::new(offset + 1, 16);
    assert_eq!(inspection.highlight_pixel(1, 0, &elsewhere).unwrap(), None);
}

#[test]
fn should_read_a_bounded_range() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("range.bin");
    fs::write(&path, (0..100u8).collect::<Vec<_>>()).unwrap();

    assert_eq!(read_range(&path, 90, 4).unwrap(), vec![90, 91, 92, 93]);
    assert_eq!(read_range(&path, 96, 16).unwrap(), vec![96, 97, 98, 99]);
    assert!(read_range(&path, 200, 16).unwrap().is_empty());
}

#[test]
fn should_surface_unreadable_files() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.png");

    match Inspection::open(&missing) {
        Err(InspectError::FileUnreadable { path, .. }) => assert_eq!(path, missing),
        other => panic!("unexpected result {other:?}"),
    }
    assert!(matches!(
        read_range(&missing, 0, 16),
        Err(InspectError::FileUnreadable { .. })
    ));
}

#[test]
fn should_reload_the_whole_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("changing.bin");
    fs::write(&path, b"first").unwrap();
    let mut inspection = Inspection::open(&path).unwrap();

    fs::write(&path, b"BM and more").unwrap();
    inspection.reload().unwrap();

    assert_eq!(inspection.bytes(), b"BM and more");
    assert_eq!(inspection.estimate().format, ContainerFormat::Bmp);
    assert_eq!(inspection.estimate().data_start_offset, 54);
}

#[test]
fn should_report_properties_of_the_opened_file() {
    let dir = TempDir::new().unwrap();
    let path = write_image(&dir, "cover.png", &prepare_10x10_coordinates_image());
    let props = Inspection::open(&path).unwrap().properties();

    assert_eq!(props.name, "cover.png");
    assert_eq!(props.container, ContainerFormat::Png);
    assert_eq!(props.md5.len(), 32);
    assert_eq!(props.sha1.len(), 40);
    assert_eq!(props.sha256.len(), 64);
    assert!(props.timestamps.modified.is_some());
    assert!(props.to_string().contains("Modified: "));
    let details = props.image.unwrap();
    assert_eq!((details.width, details.height), (10, 10));
    assert_eq!(details.format.as_deref(), Some("Png"));
}
