use crate::form::{FieldName, InputForm};
use crate::ui::{theme, truncate_with_ellipsis};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

const LABEL_WIDTH: usize = 17;

pub struct FormPanel<'a> {
    pub form: &'a InputForm,
}

impl<'a> Widget for FormPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let block = Block::default()
            .title(" branchscope ")
            .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACTIVE_BORDER));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < LABEL_WIDTH as u16 + 4 {
            return;
        }

        let value_w = (inner.width as usize).saturating_sub(LABEL_WIDTH + 3);

        for (i, name) in FieldName::ALL.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let focused = *name == self.form.focused;
            let draft = self.form.draft(*name);
            let pending = draft != self.form.tuple().get(*name);

            let label_style = if focused {
                Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::DIM_TEXT)
            };

            let shown = if *name == FieldName::Token {
                mask(draft)
            } else {
                draft.to_string()
            };

            let mut spans = vec![
                Span::styled(if pending { "*" } else { " " }, Style::default().fg(theme::WARN_FG)),
                Span::styled(format!("{:<width$} ", name.label(), width = LABEL_WIDTH), label_style),
                Span::styled(
                    truncate_with_ellipsis(&shown, value_w),
                    Style::default().fg(theme::INPUT_COLOR),
                ),
            ];
            if focused {
                spans.push(Span::styled("\u{258c}", Style::default().fg(theme::INPUT_COLOR)));
            }

            buf.set_line(inner.x, y, &Line::from(spans), inner.width);
        }
    }
}

fn mask(token: &str) -> String {
    "\u{2022}".repeat(token.chars().count())
}
