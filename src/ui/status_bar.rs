use crate::reconcile::FetchStatus;
use crate::ui::theme;
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

pub struct StatusBar<'a> {
    pub status: FetchStatus,
    pub target: &'a str,
    pub api: &'a str,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let bg = Style::default().bg(theme::STATUS_BG);
        for x in area.x..area.right() {
            buf[(x, area.y)].set_style(bg);
        }

        let (status_text, status_color) = match self.status {
            FetchStatus::Idle => ("idle", theme::DIM_TEXT),
            FetchStatus::Loading => ("loading", theme::ACCENT),
            FetchStatus::Settled => ("settled", theme::INPUT_COLOR),
        };

        let mut spans = vec![
            Span::styled(
                format!(" {status_text} "),
                Style::default()
                    .fg(status_color)
                    .bg(theme::STATUS_BG)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "\u{2502}",
                Style::default().fg(theme::SEPARATOR).bg(theme::STATUS_BG),
            ),
            Span::styled(
                format!(" {} ", self.api),
                Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG),
            ),
        ];
        if !self.target.is_empty() {
            spans.push(Span::styled(
                "\u{2502}",
                Style::default().fg(theme::SEPARATOR).bg(theme::STATUS_BG),
            ));
            spans.push(Span::styled(
                format!(" {} ", self.target),
                Style::default().bg(theme::STATUS_BG),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);

        let hints = "Enter: commit  Tab: next  Ctrl-U: clear  Esc: quit ";
        let hints_w = UnicodeWidthStr::width(hints);
        let area_w = area.width as usize;
        if area_w > hints_w + 30 {
            let x = area.x + (area_w - hints_w) as u16;
            let span = Span::styled(hints, Style::default().fg(theme::DIM_TEXT).bg(theme::STATUS_BG));
            buf.set_line(x, area.y, &Line::from(span), hints_w as u16);
        }
    }
}
