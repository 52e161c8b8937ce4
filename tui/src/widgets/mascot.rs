//! Mascot Widget
//!
//! Draws a [`MascotView`] into a terminal rectangle.
//!
//! # Layout
//!
//! ```text
//! ╭──────────────────────╮
//! │ activity bubble text │   hidden when there is no activity
//! ╰──────────────────────╯
//!        ✦       ✦            particles scattered around the body
//!        ╭─────╮
//!        │ 🚀  │              glyph for the mood's icon, bobbing with
//!        ╰─────╯              the motion profile's vertical offset
//!      celebrating
//!   Lv 3 · 🔥 8                level and streak, tooltip on hover
//! ```

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use swifter_core::{Icon, MascotView, MotionFrame, Particle};

use crate::theme::{mood_color, BUBBLE_TEXT, DIM_GRAY, SPARKLE, SWIFTER_LAVENDER};

/// Body box size in cells
const BODY_WIDTH: u16 = 7;
const BODY_HEIGHT: u16 = 3;

/// Rows reserved above the body for the bubble
const BUBBLE_ROWS: u16 = 4;

/// Motion offset units per terminal row
const OFFSET_PER_ROW: f32 = 5.0;

/// Furthest a particle lands from the body, in columns
const PARTICLE_SPREAD: f32 = 6.0;

/// Terminal glyph for an icon
#[must_use]
pub fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Brain => "🧠",
        Icon::Rocket => "🚀",
        Icon::Star => "⭐",
        Icon::Heart => "💖",
        Icon::Lightbulb => "💡",
        Icon::Flame => "🔥",
        Icon::Target => "🎯",
        Icon::Lightning => "⚡",
    }
}

/// Whole-row vertical offset for a motion frame (negative = up)
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn bob_rows(frame: MotionFrame) -> i16 {
    (frame.translate_y / OFFSET_PER_ROW).round().clamp(-2.0, 1.0) as i16
}

/// Widget rendering the mascot
pub struct MascotWidget<'a> {
    view: &'a MascotView,
    elapsed: Duration,
}

impl<'a> MascotWidget<'a> {
    /// Render `view` with its motion `elapsed` into the current mood
    #[must_use]
    pub fn new(view: &'a MascotView, elapsed: Duration) -> Self {
        Self { view, elapsed }
    }

    /// Where the clickable body ends up inside `area`
    #[must_use]
    pub fn body_rect(area: Rect) -> Rect {
        let x = area.x + area.width.saturating_sub(BODY_WIDTH) / 2;
        let y = area.y + BUBBLE_ROWS.min(area.height.saturating_sub(BODY_HEIGHT)) + 1;
        Rect::new(x, y, BODY_WIDTH.min(area.width), BODY_HEIGHT).intersection(area)
    }

    fn render_bubble(&self, area: Rect, buf: &mut Buffer) {
        if !self.view.has_activity() || area.height < 3 {
            return;
        }
        let width = area.width.saturating_sub(4).max(1) as usize;
        let lines = textwrap::wrap(&self.view.activity, width);
        let text: Vec<String> = lines.iter().take(2).map(ToString::to_string).collect();
        let longest = text.iter().map(|l| l.width()).max().unwrap_or(0);

        let bubble_width = u16::try_from(longest + 4).unwrap_or(u16::MAX).min(area.width);
        let bubble_height = u16::try_from(text.len() + 2).unwrap_or(3).min(area.height);
        let bubble = Rect::new(
            area.x + (area.width - bubble_width) / 2,
            area.y,
            bubble_width,
            bubble_height,
        );

        Paragraph::new(text.join("\n"))
            .style(Style::default().fg(BUBBLE_TEXT))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(mood_color(self.view.mood))),
            )
            .render(bubble, buf);
    }

    fn render_body(&self, body: Rect, buf: &mut Buffer) {
        let frame = self.view.motion.sample(self.elapsed);
        let color = mood_color(self.view.mood);

        let mut border = Style::default().fg(color);
        if frame.scale > 1.08 {
            border = border.add_modifier(Modifier::BOLD);
        }

        let offset = bob_rows(frame);
        let y = body.y.saturating_add_signed(offset).max(body.y.saturating_sub(2));
        let shifted = Rect::new(body.x, y, body.width, body.height);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(shifted);
        block.render(shifted, buf);

        let icon = glyph(self.view.icon);
        let icon_x = inner.x + inner.width.saturating_sub(2) / 2;
        buf.set_string(icon_x, inner.y, icon, Style::default());
    }

    fn render_particles(&self, area: Rect, body: Rect, buf: &mut Buffer) {
        for particle in &self.view.particles {
            if let Some((x, y)) = particle_cell(particle, body, area) {
                buf.set_string(x, y, "✦", Style::default().fg(SPARKLE));
            }
        }
    }

    fn render_footer(&self, area: Rect, body: Rect, buf: &mut Buffer) {
        let mut y = body.bottom();
        let mood = self.view.mood.name();
        if y < area.bottom() {
            centered(buf, area, y, mood, Style::default().fg(DIM_GRAY));
            y += 1;
        }

        let line = self
            .view
            .tooltip
            .clone()
            .unwrap_or_else(|| format!("Lv {} · 🔥 {}", self.view.level, self.view.streak));
        if y < area.bottom() {
            centered(buf, area, y, &line, Style::default().fg(SWIFTER_LAVENDER));
        }
    }
}

impl Widget for MascotWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < BODY_WIDTH || area.height < BODY_HEIGHT {
            return;
        }

        let body = Self::body_rect(area);
        let bubble_area = Rect::new(
            area.x,
            area.y,
            area.width,
            body.y.saturating_sub(area.y).saturating_sub(1),
        );

        self.render_bubble(bubble_area, buf);
        self.render_body(body, buf);
        self.render_particles(area, body, buf);
        self.render_footer(area, body, buf);
    }
}

/// Cell for a particle, if it lands inside `area`
///
/// Particles fan out sideways from the body and never cover it.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn particle_cell(particle: &Particle, body: Rect, area: Rect) -> Option<(u16, u16)> {
    let spread = (particle.x.abs() * PARTICLE_SPREAD).round() as u16;
    let x = if particle.x < 0.0 {
        body.x.checked_sub(1 + spread)?
    } else {
        body.right().saturating_add(spread)
    };

    let mid = f32::from(body.y) + f32::from(body.height) / 2.0;
    let top = f32::from(body.y.saturating_sub(1));
    let bottom = f32::from(body.bottom().saturating_sub(1));
    let y = (mid + particle.y * 1.5).round().clamp(top, bottom) as u16;

    (area.contains(Position::new(x, y))).then_some((x, y))
}

fn centered(buf: &mut Buffer, area: Rect, y: u16, text: &str, style: Style) {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    let x = area.x + area.width.saturating_sub(width) / 2;
    buf.set_stringn(x, y, text, area.width as usize, style);
}
