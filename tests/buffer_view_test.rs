use std::collections::HashSet;

use fieldview::core::{cell_index, BufferView, FieldError, PictureHandle};

#[test]
fn cell_index_covers_grid_exactly_once() {
    for (width, height) in [(1u32, 1u32), (2, 1), (1, 5), (7, 3), (16, 16)] {
        let mut seen = HashSet::new();
        for row in 0..height {
            for col in 0..width {
                let idx = cell_index(width, row, col);
                assert!(idx < (width * height) as usize);
                assert!(seen.insert(idx), "duplicate index {idx} in {width}x{height}");
            }
        }
        assert_eq!(seen.len(), (width * height) as usize);
    }
}

#[test]
fn handle_with_foreign_layout_reads_same_values() {
    // Color first, then alpha, with a gap: offsets are whatever the collaborator says.
    let width = 2u32;
    let height = 1u32;
    let mut region = vec![0u8; 64];
    let color_offset = 0;
    let alpha_offset = 40;
    let colors = [1.0f32, 0.0, 0.0, 0.0, 1.0, 0.0];
    for (i, c) in colors.iter().enumerate() {
        region[color_offset + 4 * i..color_offset + 4 * i + 4].copy_from_slice(&c.to_ne_bytes());
    }
    for (i, a) in [0.5f32, 0.9].iter().enumerate() {
        region[alpha_offset + 4 * i..alpha_offset + 4 * i + 4].copy_from_slice(&a.to_ne_bytes());
    }

    let handle =
        PictureHandle::new(width, height, alpha_offset, color_offset, None, region.len()).unwrap();
    let view = BufferView::new(&handle, &region).unwrap();
    assert_eq!(view.alpha(0, 0), 0.5);
    assert_eq!(view.alpha(0, 1), 0.9);
    assert_eq!(view.color(0, 0), (1.0, 0.0, 0.0));
    assert_eq!(view.color(0, 1), (0.0, 1.0, 0.0));
    assert!(!view.has_counter());
}

#[test]
fn handle_rejects_region_too_small_for_alpha() {
    let err = PictureHandle::new(4, 4, 0, 64, None, 32).unwrap_err();
    assert_eq!(
        err,
        FieldError::RegionTooSmall {
            array: "alpha",
            offset: 0,
            needed: 64,
            available: 32
        }
    );
}
