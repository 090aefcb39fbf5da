//! Integration tests for replaying image directories as camera frames.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use hands_off_adapters::{FramePacer, FsFrameSource, YuvPreprocessor};
use hands_off_core::{FramePreprocessor, FrameSource, PixelFormat, Rotation};
use image::{Rgb, RgbImage};
use std::path::Path;
use std::time::{Duration, Instant};

fn write_frame(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn test_frames_in_file_name_order() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "frame_002.png", 4, 2, [0, 0, 255]);
    write_frame(dir.path(), "frame_000.png", 4, 2, [255, 0, 0]);
    write_frame(dir.path(), "frame_001.png", 4, 2, [0, 255, 0]);
    std::fs::write(dir.path().join("landmarks.jsonl"), "{}\n").unwrap();

    let mut source = FsFrameSource::open(dir.path()).unwrap();
    assert_eq!(source.len(), 3);

    let mut firsts = Vec::new();
    while let Some(frame) = source.next_frame().unwrap() {
        assert_eq!(frame.format, PixelFormat::Rgb8);
        assert_eq!((frame.width, frame.height), (4, 2));
        firsts.push((frame.sequence, [frame.data[0], frame.data[1], frame.data[2]]));
    }
    assert_eq!(
        firsts,
        vec![(0, [255, 0, 0]), (1, [0, 255, 0]), (2, [0, 0, 255])]
    );
}

#[test]
fn test_unreadable_frame_keeps_numbering() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "a.png", 2, 2, [10, 10, 10]);
    std::fs::write(dir.path().join("b.png"), b"not a png").unwrap();
    write_frame(dir.path(), "c.png", 2, 2, [20, 20, 20]);

    let mut source = FsFrameSource::open(dir.path()).unwrap();
    let sequences: Vec<u64> = std::iter::from_fn(|| source.next_frame().unwrap())
        .map(|f| f.sequence)
        .collect();
    assert_eq!(sequences, vec![0, 2]);
}

#[test]
fn test_rotation_hint_reaches_decoder() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(dir.path(), "frame.png", 6, 2, [50, 60, 70]);

    let mut source = FsFrameSource::open(dir.path())
        .unwrap()
        .with_rotation(Rotation::Deg90);
    let frame = source.next_frame().unwrap().unwrap();
    assert_eq!(frame.rotation, Rotation::Deg90);

    let decoded = YuvPreprocessor::new().decode(&frame).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (2, 6));
    assert_eq!(decoded.image.get_pixel(1, 5).0, [50, 60, 70]);
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FsFrameSource::open(&dir.path().join("nope")).err().unwrap();
    assert!(format!("{err:#}").contains("Failed to read frame directory"));
}

#[test]
fn test_pacer_slows_replay() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..3 {
        write_frame(dir.path(), &format!("{i}.png"), 2, 2, [0, 0, 0]);
    }

    let mut source = FsFrameSource::open(dir.path())
        .unwrap()
        .with_pacer(FramePacer::new(50.0));
    let start = Instant::now();
    while source.next_frame().unwrap().is_some() {}
    assert!(start.elapsed() >= Duration::from_millis(40));
}
