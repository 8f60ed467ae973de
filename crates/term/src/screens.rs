//! Full-screen dialogs shown around a round: intro pages, the settings form
//! and the end-of-round report.

use crate::core::{ParamField, SessionReport, SettingsForm};
use crate::fb::{BoxChars, CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;

pub const INTRO_PAGES: [&[&str]; 3] = [
    &[
        "Welcome to the Tile Flipping Game!",
        "",
        "Instructions:",
        "1. Click on a tile (or move and press space) to flip it.",
        "2. Match a number of identical tiles in a row to cancel them out.",
        "3. If the tiles do not match, they will be flipped back.",
        "4. Cancel all tiles to win the game.",
    ],
    &[
        "This game is quite different from similar games",
        "where you need flip only two tiles with the same pattern to cancel them.",
        "",
        "You can assign the number of identical tiles required to cancel them out,",
        "and that many copies of every tile will be generated automatically.",
    ],
    &[
        "You will then be asked for the number of different tiles",
        "and the number of identical tiles in each group.",
        "",
        "Please fill in POSITIVE NUMBERS only.",
        "",
        "You will receive warnings if you do not do so.",
    ],
];

const FIELD_W: u16 = 14;

fn text() -> CellStyle {
    CellStyle::default()
}

fn title() -> CellStyle {
    CellStyle::new(Rgb::new(255, 210, 60), Rgb::new(0, 0, 0)).bold()
}

fn hint() -> CellStyle {
    CellStyle::new(Rgb::new(130, 130, 140), Rgb::new(0, 0, 0))
}

fn error() -> CellStyle {
    CellStyle::new(Rgb::new(255, 90, 90), Rgb::new(0, 0, 0)).bold()
}

/// Inner text area of a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Inner {
    x: u16,
    y: u16,
    w: u16,
}

/// Clear the screen and draw a centered box sized for `body_w x body_h`.
fn draw_dialog(
    fb: &mut FrameBuffer,
    viewport: Viewport,
    heading: &str,
    body_w: u16,
    body_h: u16,
) -> Inner {
    fb.resize(viewport.width, viewport.height);
    fb.clear(text().into_cell(' '));

    let w = body_w
        .max(heading.chars().count() as u16 + 4)
        .saturating_add(4)
        .min(viewport.width);
    let h = body_h.saturating_add(4).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.draw_box(x, y, w, h, BoxChars::LIGHT, hint());
    fb.put_str_centered(x, y, w, &format!(" {} ", heading), title());
    Inner {
        x: x.saturating_add(2),
        y: y.saturating_add(2),
        w: w.saturating_sub(4),
    }
}

fn widest<'a>(lines: impl IntoIterator<Item = &'a str>) -> u16 {
    lines
        .into_iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16
}

/// Render intro page `page` (clamped to the last page).
pub fn render_intro(page: usize, viewport: Viewport, fb: &mut FrameBuffer) {
    let page = page.min(INTRO_PAGES.len() - 1);
    let lines = INTRO_PAGES[page];
    let footer = format!(
        "Page {}/{}   enter: next   q: quit",
        page + 1,
        INTRO_PAGES.len()
    );
    let body_w = widest(lines.iter().copied()).max(footer.chars().count() as u16);
    let inner = draw_dialog(fb, viewport, "Introductions", body_w, lines.len() as u16 + 2);

    for (i, line) in lines.iter().enumerate() {
        fb.put_str(inner.x, inner.y + i as u16, line, text());
    }
    fb.put_str(inner.x, inner.y + lines.len() as u16 + 1, &footer, hint());
}

/// Render the parameter form, its focused field and the last validation error.
pub fn render_settings(form: &SettingsForm, viewport: Viewport, fb: &mut FrameBuffer) {
    let fields = [ParamField::DifferentTiles, ParamField::GroupSize];
    let label_w = widest(fields.iter().map(|f| f.label())) + 2;
    let message = form.error().map(|e| e.to_string());
    let limit = format!("Total tiles must stay below {}.", form.max_tiles());
    let footer = "tab: switch field   enter: start   esc: quit";

    let body_w = (label_w + FIELD_W)
        .max(widest([limit.as_str(), footer]))
        .max(message.as_deref().map_or(0, |m| widest([m])));
    let inner = draw_dialog(fb, viewport, "Enter Game Settings", body_w, 8);

    for (i, field) in fields.iter().enumerate() {
        let y = inner.y + i as u16;
        let focused = form.focus() == *field;
        let label_style = if focused { title() } else { text() };
        fb.put_str(inner.x, y, field.label(), label_style);
        fb.put_str(inner.x + label_w - 2, y, ":", label_style);

        let field_x = inner.x + label_w;
        let field_style = if focused {
            CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(220, 220, 220))
        } else {
            CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(50, 50, 60))
        };
        fb.fill_rect(field_x, y, FIELD_W, 1, ' ', field_style);
        let end = fb.put_str(field_x, y, form.value(*field), field_style);
        if focused && end < field_x + FIELD_W {
            fb.put_char(end, y, '_', field_style);
        }
    }

    fb.put_str(inner.x, inner.y + 3, &limit, hint());
    if let Some(message) = &message {
        fb.put_str(inner.x, inner.y + 5, message, error());
    }
    fb.put_str(inner.x, inner.y + 7, footer, hint());
}

/// Text of the end-of-round report.
pub fn report_lines(report: &SessionReport) -> Vec<String> {
    vec![
        "You have canceled all the tiles and thus finished this round!".to_string(),
        String::new(),
        format!("Time spent: {:.3} seconds", report.elapsed_secs),
        format!("Total flips: {}", report.flips),
        format!("Total tiles: {}", report.total_tiles),
        format!(
            "In average you clicked each tile {:.2} times",
            report.flips_per_tile()
        ),
        String::new(),
        "Do you want to play again? (y/n)".to_string(),
    ]
}

pub fn render_report(report: &SessionReport, viewport: Viewport, fb: &mut FrameBuffer) {
    let lines = report_lines(report);
    let body_w = widest(lines.iter().map(String::as_str));
    let inner = draw_dialog(fb, viewport, "Round Complete", body_w, lines.len() as u16);

    let last = lines.len() - 1;
    for (i, line) in lines.iter().enumerate() {
        let style = if i == last { title() } else { text() };
        fb.put_str(inner.x, inner.y + i as u16, line, style);
    }
}
