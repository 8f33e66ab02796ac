//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so every frame can be checked in unit tests. The screen is
//! split into a one-row HUD, the puzzle panel on the left, the reflex panel
//! on the right and a two-row key legend at the bottom. Logical reflex-panel
//! coordinates (600 x 800) are scaled onto whatever cells the panel gets.

use crate::core::{GameSnapshot, Puzzle, PuzzleBody};
use crate::fb::{CellStyle, FrameBuffer, Rect, Rgb};
use crate::types::{
    GamePhase, ShapeColor, ShapeKind, StroopColor, CURSOR_Y, REFLEX_HEIGHT, REFLEX_WIDTH,
};

/// Smallest terminal the layout fits into.
pub const MIN_WIDTH: u16 = 48;
pub const MIN_HEIGHT: u16 = 16;

const HUD_ROWS: u16 = 1;
const FOOTER_ROWS: u16 = 2;
const OVERLAY_W: u16 = 32;
const OVERLAY_H: u16 = 7;
/// The timer bar turns red once this little time is left.
const TIMER_WARNING_MS: u32 = 2000;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }
}

/// Screen regions for one viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub hud: Rect,
    pub puzzle: Rect,
    pub reflex: Rect,
    /// Playfield inside the reflex panel, below the target banner.
    pub field: Rect,
    pub footer: Rect,
}

impl Layout {
    /// `None` when the viewport is smaller than [`MIN_WIDTH`] x [`MIN_HEIGHT`].
    pub fn compute(viewport: Viewport) -> Option<Layout> {
        let (w, h) = (viewport.width, viewport.height);
        if w < MIN_WIDTH || h < MIN_HEIGHT {
            return None;
        }

        let panel_h = h - HUD_ROWS - FOOTER_ROWS;
        let left_w = w / 2;
        let puzzle = Rect::new(0, HUD_ROWS, left_w, panel_h);
        let reflex = Rect::new(left_w, HUD_ROWS, w - left_w, panel_h);

        let inner = reflex.inner();
        let field = Rect::new(inner.x, inner.y + 1, inner.w, inner.h - 1);

        Some(Layout {
            hud: Rect::new(0, 0, w, HUD_ROWS),
            puzzle,
            reflex,
            field,
            footer: Rect::new(0, h - FOOTER_ROWS, w, FOOTER_ROWS),
        })
    }

    /// Cell for a logical reflex-panel position, or `None` when it is off the
    /// visible playfield (e.g. shapes still above the top edge).
    pub fn project(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        if !(0.0..=REFLEX_WIDTH).contains(&x) || !(0.0..=REFLEX_HEIGHT).contains(&y) {
            return None;
        }
        let f = self.field;
        if f.w == 0 || f.h == 0 {
            return None;
        }
        let col = ((x / REFLEX_WIDTH) * f.w as f32) as u16;
        let row = ((y / REFLEX_HEIGHT) * f.h as f32) as u16;
        Some((f.x + col.min(f.w - 1), f.y + row.min(f.h - 1)))
    }
}

/// Dual-panel terminal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    show_legend: bool,
}

impl Default for GameView {
    fn default() -> Self {
        Self { show_legend: true }
    }
}

// Styles
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK);
const LABEL: CellStyle = CellStyle::new(Rgb::LIGHT_GRAY, Rgb::BLACK);
const BORDER: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
const HINT: CellStyle = CellStyle::new(Rgb::GRAY, Rgb::BLACK);
const TITLE: CellStyle = CellStyle::new(Rgb::WHITE, Rgb::BLACK).bold();
const OVERLAY: CellStyle = CellStyle::new(Rgb::WHITE, Rgb::new(20, 20, 30));
const HIGHLIGHT: CellStyle = CellStyle::new(Rgb::BLACK, Rgb::YELLOW).bold();

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the bottom key legend (the panels keep their size).
    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// This is the per-frame path: callers keep one framebuffer around.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT.cell(' '));

        let Some(layout) = Layout::compute(viewport) else {
            draw_too_small(fb, viewport);
            return;
        };

        draw_hud(fb, layout.hud, snap);
        draw_puzzle_panel(fb, layout.puzzle, snap);
        draw_reflex_panel(fb, &layout, snap);
        if self.show_legend {
            draw_legend(fb, layout.footer);
        }

        match snap.phase {
            GamePhase::Running => {}
            GamePhase::Paused => {
                let area = overlay_rect(viewport);
                draw_overlay_frame(fb, area);
                fb.put_str_centered(area, area.y + 2, "PAUSED", TITLE.with_fg(Rgb::YELLOW));
                fb.put_str_centered(area, area.y + 4, "Press SPACE to resume", OVERLAY);
            }
            GamePhase::GameOver => {
                let area = overlay_rect(viewport);
                draw_overlay_frame(fb, area);
                fb.put_str_centered(area, area.y + 1, "GAME OVER", TITLE.with_fg(Rgb::RED));
                put_labeled_u32_centered(fb, area, area.y + 3, "FINAL SCORE: ", snap.score, OVERLAY);
                put_labeled_u32_centered(fb, area, area.y + 4, "BEST: ", snap.best_score, OVERLAY);
                fb.put_str_centered(area, area.y + 5, "Press R or SPACE to restart", OVERLAY);
            }
        }
    }

    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }
}

pub fn shape_rgb(color: ShapeColor) -> Rgb {
    match color {
        ShapeColor::Red => Rgb::RED,
        ShapeColor::Blue => Rgb::new(70, 110, 255),
        ShapeColor::Green => Rgb::GREEN,
        ShapeColor::Yellow => Rgb::YELLOW,
        ShapeColor::Purple => Rgb::new(170, 60, 200),
        ShapeColor::Orange => Rgb::ORANGE,
    }
}

pub fn stroop_rgb(color: StroopColor) -> Rgb {
    match color {
        StroopColor::Red => Rgb::RED,
        StroopColor::Blue => Rgb::new(70, 110, 255),
        StroopColor::Green => Rgb::GREEN,
        StroopColor::Yellow => Rgb::YELLOW,
    }
}

pub fn shape_glyph(kind: ShapeKind) -> char {
    match kind {
        ShapeKind::Circle => '●',
        ShapeKind::Triangle => '▲',
        ShapeKind::Square => '■',
    }
}

fn draw_too_small(fb: &mut FrameBuffer, viewport: Viewport) {
    let area = viewport.rect();
    let mid = viewport.height / 2;
    fb.put_str_centered(area, mid.saturating_sub(1), "Terminal too small", TITLE);
    let label = "need ";
    let len = label.len() as u16 + digit_count(MIN_WIDTH as u32) + 1 + digit_count(MIN_HEIGHT as u32);
    let x = viewport.width.saturating_sub(len) / 2;
    let x = fb.put_str(x, mid, label, HINT);
    let x = fb.put_u32(x, mid, MIN_WIDTH as u32, HINT);
    let x = fb.put_str(x, mid, "x", HINT);
    fb.put_u32(x, mid, MIN_HEIGHT as u32, HINT);
}

fn draw_hud(fb: &mut FrameBuffer, area: Rect, snap: &GameSnapshot) {
    let y = area.y;
    let mut x = fb.put_str(area.x + 1, y, "JUGGLE BALLS ", LABEL);
    let ball = CellStyle::new(Rgb::RED, Rgb::BLACK).bold();
    for _ in 0..snap.balls() {
        fb.put_char(x, y, '●', ball);
        x = x.saturating_add(2);
    }

    let score_x = area.x + area.w / 2 - 6;
    let x = fb.put_str(score_x, y, "SCORE ", LABEL);
    fb.put_u32(x, y, snap.score, TITLE);

    let best_w = 5 + digit_count(snap.best_score);
    let best_x = area.right().saturating_sub(best_w + 1);
    let x = fb.put_str(best_x, y, "BEST ", LABEL);
    fb.put_u32(x, y, snap.best_score, TEXT);
}

fn draw_puzzle_panel(fb: &mut FrameBuffer, area: Rect, snap: &GameSnapshot) {
    fb.draw_box(area, BORDER);
    fb.put_str(area.x + 2, area.y, " NEURAL PUZZLE ", TITLE);
    let inner = area.inner();

    let Some(puzzle) = snap.puzzle.as_ref() else {
        let mid = inner.y + inner.h / 2;
        let secs = snap.next_puzzle_in_ms.div_ceil(1000);
        let label = "Next puzzle in ";
        let len = label.len() as u16 + digit_count(secs) + 1;
        let x = inner.x + inner.w.saturating_sub(len) / 2;
        let x = fb.put_str(x, mid.saturating_sub(1), label, LABEL);
        let x = fb.put_u32(x, mid.saturating_sub(1), secs, TEXT);
        fb.put_char(x, mid.saturating_sub(1), 's', LABEL);
        fb.put_str_centered(inner, mid + 1, "Keep juggling!", HINT);
        return;
    };

    draw_timer(fb, inner, puzzle);
    fb.put_str_centered(inner, inner.y + 3, puzzle.kind().title(), TITLE);
    fb.put_str_centered(inner, inner.y + 4, puzzle.instructions(), LABEL);

    let content_y = inner.y + 6;
    match puzzle.body() {
        PuzzleBody::Sequence(seq) => {
            let highlight = puzzle.highlight_index();
            let width = (seq.sequence().len() as u16) * 4 - 1;
            let x0 = inner.x + inner.w.saturating_sub(width) / 2;
            for i in 0..seq.sequence().len() {
                let x = x0 + (i as u16) * 4;
                let (ch, style) = if seq.is_showing() {
                    let style = if highlight == Some(i) { HIGHLIGHT } else { TITLE };
                    ((b'0' + seq.sequence()[i]) as char, style)
                } else if let Some(&d) = seq.entered().get(i) {
                    ((b'0' + d) as char, TITLE.with_fg(Rgb::GREEN))
                } else {
                    ('_', HINT)
                };
                fb.put_char(x, content_y, '[', BORDER);
                fb.put_char(x + 1, content_y, ch, style);
                fb.put_char(x + 2, content_y, ']', BORDER);
            }
        }
        PuzzleBody::Arithmetic(arith) => {
            let width = digit_count(arith.lhs().unsigned_abs())
                + digit_count(arith.rhs().unsigned_abs())
                + 7;
            let x = inner.x + inner.w.saturating_sub(width) / 2;
            let x = fb.put_u32(x, content_y, arith.lhs().unsigned_abs(), TITLE);
            fb.put_char(x + 1, content_y, arith.op().symbol(), TITLE.with_fg(Rgb::YELLOW));
            let x = fb.put_u32(x + 3, content_y, arith.rhs().unsigned_abs(), TITLE);
            fb.put_str(x, content_y, " = ?", TITLE);

            let entry_w = arith.entry().len() as u16 + 3;
            let x = inner.x + inner.w.saturating_sub(entry_w) / 2;
            let x = fb.put_str(x, content_y + 2, "> ", LABEL);
            let x = fb.put_str(x, content_y + 2, arith.entry(), TEXT.bold());
            fb.put_char(x, content_y + 2, '_', HINT);
        }
        PuzzleBody::WordColor(wc) => {
            let ink = CellStyle::new(stroop_rgb(wc.ink()), Rgb::BLACK).bold();
            fb.put_str_centered(inner, content_y, wc.word().word(), ink);
            draw_color_legend(fb, inner, content_y + 2);
        }
    }
}

fn draw_timer(fb: &mut FrameBuffer, inner: Rect, puzzle: &Puzzle) {
    let remaining = puzzle.time_remaining_ms();
    let x = fb.put_str(inner.x + 1, inner.y, "TIME ", LABEL);
    let x = fb.put_u32(x, inner.y, remaining / 1000, TEXT);
    fb.put_char(x, inner.y, '.', TEXT);
    fb.put_u32(x + 1, inner.y, (remaining % 1000) / 100, TEXT);
    fb.put_char(x + 2, inner.y, 's', LABEL);

    let bar_w = inner.w.saturating_sub(2);
    let frac = puzzle.remaining_fraction().clamp(0.0, 1.0);
    let filled = (frac * bar_w as f32).round() as u16;
    let fg = if remaining > TIMER_WARNING_MS { Rgb::GREEN } else { Rgb::RED };
    for i in 0..bar_w {
        let (ch, style) = if i < filled {
            ('█', CellStyle::new(fg, Rgb::BLACK))
        } else {
            ('░', HINT.dim())
        };
        fb.put_char(inner.x + 1 + i, inner.y + 1, ch, style);
    }
}

fn draw_color_legend(fb: &mut FrameBuffer, inner: Rect, y: u16) {
    for (row, pair) in StroopColor::ALL.chunks(2).enumerate() {
        let width: u16 = pair.iter().map(|c| c.word().len() as u16 + 2).sum::<u16>() + 2;
        let mut x = inner.x + inner.w.saturating_sub(width) / 2;
        let y = y + row as u16;
        for color in pair {
            fb.put_char(x, y, (b'0' + color.answer_digit()) as char, TEXT.bold());
            x = fb.put_str(x + 2, y, color.word(), CellStyle::new(stroop_rgb(*color), Rgb::BLACK));
            x += 2;
        }
    }
}

fn draw_reflex_panel(fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
    let area = layout.reflex;
    fb.draw_box(area, BORDER);
    fb.put_str(area.x + 2, area.y, " REFLEX ", TITLE);

    let inner = area.inner();
    let label = "CATCH: ";
    let target = snap.target.plural_label();
    let len = (label.len() + target.len()) as u16 + 2;
    let x = inner.x + inner.w.saturating_sub(len) / 2;
    let x = fb.put_str(x, inner.y, label, LABEL);
    let x = fb.put_str(x, inner.y, target, TITLE.with_fg(Rgb::YELLOW));
    fb.put_char(x + 1, inner.y, shape_glyph(snap.target), TITLE.with_fg(Rgb::YELLOW));

    for shape in snap.shapes.iter() {
        if let Some((x, y)) = layout.project(shape.x, shape.y) {
            let style = CellStyle::new(shape_rgb(shape.color), Rgb::BLACK).bold();
            fb.put_char(x, y, shape_glyph(shape.kind), style);
        }
    }

    if let Some((cx, cy)) = layout.project(snap.cursor_x, CURSOR_Y) {
        let style = TITLE;
        let field = layout.field;
        for (dx, ch) in [(-1i32, '('), (0, '◯'), (1, ')')] {
            let x = cx as i32 + dx;
            if x >= 0 && field.contains(x as u16, cy) {
                fb.put_char(x as u16, cy, ch, style);
            }
        }
    }
}

fn draw_legend(fb: &mut FrameBuffer, area: Rect) {
    fb.put_str_clipped(
        area.x + 1,
        area.y,
        area.w.saturating_sub(2),
        "←/→ A/D move   SPACE/P pause   R restart   Q/ESC quit",
        HINT,
    );
    fb.put_str_clipped(
        area.x + 1,
        area.y + 1,
        area.w.saturating_sub(2),
        "Puzzle: 0-9 and - type, BACKSPACE erase, ENTER submit",
        HINT,
    );
}

fn overlay_rect(viewport: Viewport) -> Rect {
    let w = OVERLAY_W.min(viewport.width);
    let h = OVERLAY_H.min(viewport.height);
    Rect::new(
        viewport.width.saturating_sub(w) / 2,
        viewport.height.saturating_sub(h) / 2,
        w,
        h,
    )
}

fn draw_overlay_frame(fb: &mut FrameBuffer, area: Rect) {
    fb.fill_rect(area, ' ', OVERLAY);
    fb.draw_box(area, OVERLAY.with_fg(Rgb::WHITE));
}

fn put_labeled_u32_centered(
    fb: &mut FrameBuffer,
    area: Rect,
    y: u16,
    label: &str,
    value: u32,
    style: CellStyle,
) {
    let len = label.chars().count() as u16 + digit_count(value);
    let x = area.x + area.w.saturating_sub(len) / 2;
    let x = fb.put_str(x, y, label, style);
    fb.put_u32(x, y, value, style.bold());
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
