use fieldview::core::PictureMemory;
use fieldview::term::{DrawSurface, GridGeometry, GridRenderer, PixelSurface};
use fieldview::types::{RenderMode, Rgb, BORDER_COLOR, CELL_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Fill(Rgb),
    Rect(u32, u32, u32, u32),
    Stroke(Rgb),
    Line(u32, u32, u32, u32),
}

#[derive(Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

impl RecordingSurface {
    fn rects(&self) -> Vec<(u32, u32, u32, u32)> {
        self.calls
            .iter()
            .filter_map(|c| match *c {
                Call::Rect(x, y, w, h) => Some((x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    fn lines(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::Line(..))).count()
    }
}

impl DrawSurface for RecordingSurface {
    fn set_fill_color(&mut self, color: Rgb) {
        self.calls.push(Call::Fill(color));
    }
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.calls.push(Call::Rect(x, y, w, h));
    }
    fn set_stroke_color(&mut self, color: Rgb) {
        self.calls.push(Call::Stroke(color));
    }
    fn stroke_line(&mut self, x0: u32, y0: u32, x1: u32, y1: u32) {
        self.calls.push(Call::Line(x0, y0, x1, y1));
    }
}

fn red_green() -> PictureMemory {
    let mut mem = PictureMemory::new(2, 1, false).unwrap();
    mem.set_alpha(0, 0, 0.5);
    mem.set_alpha(0, 1, 0.9);
    mem.set_color(0, 0, (1.0, 0.0, 0.0));
    mem.set_color(0, 1, (0.0, 1.0, 0.0));
    mem
}

#[test]
fn end_to_end_two_cells() {
    let mem = red_green();
    let geometry = GridGeometry::new(CELL_SIZE, false).unwrap();
    let renderer = GridRenderer::new(geometry, RenderMode::FullColor);

    let mut rec = RecordingSurface::default();
    renderer.render(&mut rec, &mem.view().unwrap());
    let cs = CELL_SIZE as u32;
    assert_eq!(
        rec.calls,
        vec![
            Call::Fill(Rgb::new(255, 0, 0)),
            Call::Rect(1, 1, cs, cs),
            Call::Fill(Rgb::new(0, 255, 0)),
            Call::Rect(1 + cs, 1, cs, cs),
        ]
    );

    let mut surface = PixelSurface::for_grid(2, 1, &geometry).unwrap();
    renderer.render(&mut surface, &mem.view().unwrap());
    assert_eq!(surface.get(1, 1), Some(Rgb::new(255, 0, 0)));
    assert_eq!(surface.get(1 + cs, 1), Some(Rgb::new(0, 255, 0)));
}

#[test]
fn paints_one_rect_per_cell_in_row_major_order() {
    let mem = PictureMemory::new(3, 2, false).unwrap();
    let geometry = GridGeometry::new(4, false).unwrap();
    let mut rec = RecordingSurface::default();
    GridRenderer::new(geometry, RenderMode::FullColor).render(&mut rec, &mem.view().unwrap());

    assert_eq!(
        rec.rects(),
        vec![
            (1, 1, 4, 4),
            (5, 1, 4, 4),
            (9, 1, 4, 4),
            (1, 5, 4, 4),
            (5, 5, 4, 4),
            (9, 5, 4, 4),
        ]
    );
    assert_eq!(rec.lines(), 0);
}

#[test]
fn gridline_mode_strokes_before_filling() {
    let mem = PictureMemory::new(3, 2, false).unwrap();
    let geometry = GridGeometry::new(1, true).unwrap();
    let mut rec = RecordingSurface::default();
    GridRenderer::new(geometry, RenderMode::FullColor).render(&mut rec, &mem.view().unwrap());

    // (3 + 1) vertical + (2 + 1) horizontal separators.
    assert_eq!(rec.lines(), 7);
    let first_fill = rec.calls.iter().position(|c| matches!(c, Call::Fill(_))).unwrap();
    let last_line = rec.calls.iter().rposition(|c| matches!(c, Call::Line(..))).unwrap();
    assert!(last_line < first_fill);
    assert_eq!(rec.rects().len(), 6);
    assert_eq!(rec.rects()[4], (3, 3, 1, 1));
}

#[test]
fn render_twice_is_pixel_identical() {
    let mut mem = PictureMemory::new(5, 4, true).unwrap();
    for row in 0..4 {
        for col in 0..5 {
            let v = (row * 5 + col) as f32 / 20.0;
            mem.set_color(row, col, (v, 1.0 - v, 0.5));
            mem.set_alpha(row, col, v);
            mem.set_counter(row, col, col % 2 + 1);
        }
    }

    for mode in [
        RenderMode::FullColor,
        RenderMode::Grayscale,
        RenderMode::BicolorCounter,
    ] {
        for gridlines in [false, true] {
            let geometry = GridGeometry::new(2, gridlines).unwrap();
            let renderer = GridRenderer::new(geometry, mode);
            let mut surface = PixelSurface::for_grid(5, 4, &geometry).unwrap();
            renderer.render(&mut surface, &mem.view().unwrap());
            let first = surface.clone();
            renderer.render(&mut surface, &mem.view().unwrap());
            assert_eq!(surface, first, "{mode} gridlines={gridlines}");
        }
    }
}

#[test]
fn render_never_touches_the_border() {
    let mut mem = PictureMemory::new(3, 3, false).unwrap();
    mem.fill_color((1.0, 1.0, 1.0));
    let geometry = GridGeometry::new(1, false).unwrap();
    let mut surface = PixelSurface::for_grid(3, 3, &geometry).unwrap();
    GridRenderer::new(geometry, RenderMode::FullColor).render(&mut surface, &mem.view().unwrap());

    for i in 0..4 {
        assert_eq!(surface.get(i, 0), Some(BORDER_COLOR));
        assert_eq!(surface.get(0, i), Some(BORDER_COLOR));
    }
    let white = surface.pixels().iter().filter(|&&p| p == Rgb::new(255, 255, 255)).count();
    assert_eq!(white, 9);
}

#[test]
fn grayscale_mode_inverts_alpha() {
    let mem = red_green();
    let geometry = GridGeometry::new(1, false).unwrap();
    let mut surface = PixelSurface::for_grid(2, 1, &geometry).unwrap();
    GridRenderer::new(geometry, RenderMode::Grayscale).render(&mut surface, &mem.view().unwrap());
    // floor(255 * (1 - 0.5)) = 127; 1 - 0.9 is not exact in f32, so allow either side.
    assert_eq!(surface.get(1, 1), Some(Rgb::gray(127)));
    let g = surface.get(2, 1).unwrap();
    assert!(g.r == 25 || g.r == 26);
}
