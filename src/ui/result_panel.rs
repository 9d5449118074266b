use crate::ui::{theme, truncate_with_ellipsis};
use crate::view::{BranchCard, Fragment, Person, RateLimitCard, RepoCard};
use ratatui::{
    buffer::Buffer as Buf,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Widget},
};

pub struct ResultPanel<'a> {
    pub fragments: &'a [Fragment],
}

fn fragment_height(fragment: &Fragment) -> u16 {
    match fragment {
        Fragment::Loading
        | Fragment::ErrorLabel(_)
        | Fragment::ErrorLink { .. }
        | Fragment::BranchMissing(_) => 1,
        Fragment::Repository(_) => 4,
        Fragment::Branch(_) => 8,
        Fragment::RateLimit(_) => 7,
    }
}

impl<'a> Widget for ResultPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buf) {
        let mut y = area.y;
        for fragment in self.fragments {
            let h = fragment_height(fragment);
            if y + h > area.bottom() {
                break;
            }
            let slot = Rect::new(area.x, y, area.width, h);
            match fragment {
                Fragment::Loading => {
                    let line = Line::from(Span::styled(
                        " Loading\u{2026}",
                        Style::default().fg(theme::ACCENT).add_modifier(Modifier::ITALIC),
                    ));
                    buf.set_line(slot.x, slot.y, &line, slot.width);
                }
                Fragment::ErrorLabel(message) => {
                    let line = Line::from(Span::styled(
                        format!(" {message}"),
                        Style::default().fg(theme::ERROR_FG),
                    ));
                    buf.set_line(slot.x, slot.y, &line, slot.width);
                }
                Fragment::ErrorLink { text, href } => {
                    let line = Line::from(vec![
                        Span::raw(" "),
                        Span::styled(
                            text.clone(),
                            Style::default()
                                .fg(theme::ERROR_FG)
                                .add_modifier(Modifier::UNDERLINED),
                        ),
                        Span::styled(format!(" <{href}>"), Style::default().fg(theme::LINK_FG)),
                    ]);
                    buf.set_line(slot.x, slot.y, &line, slot.width);
                }
                Fragment::BranchMissing(notice) => {
                    let line = Line::from(Span::styled(
                        format!(" {notice}"),
                        Style::default().fg(theme::WARN_FG),
                    ));
                    buf.set_line(slot.x, slot.y, &line, slot.width);
                }
                Fragment::Repository(card) => render_repo(card, slot, buf),
                Fragment::Branch(card) => render_branch(card, slot, buf),
                Fragment::RateLimit(card) => render_rate_limit(card, slot, buf),
            }
            y += h;
        }
    }
}

fn card(title: &str, area: Rect, buf: &mut Buf) -> Rect {
    let block = Block::default()
        .title(format!(" {title} "))
        .title_style(Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_COLOR));
    let inner = block.inner(area);
    block.render(area, buf);
    inner
}

fn secondary(text: &str, width: usize) -> Span<'static> {
    Span::styled(
        truncate_with_ellipsis(text, width),
        Style::default().fg(theme::DIM_TEXT),
    )
}

fn person_line(person: &Person, width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", person.role), Style::default().fg(theme::ACCENT)),
        secondary(&person.name, width.saturating_sub(10)),
    ])
}

fn render_repo(card_data: &RepoCard, area: Rect, buf: &mut Buf) {
    let inner = card("Repository", area, buf);
    let w = inner.width as usize;
    if inner.height < 2 {
        return;
    }
    buf.set_line(
        inner.x,
        inner.y,
        &Line::from(secondary(&card_data.name_with_owner, w)),
        inner.width,
    );
    buf.set_line(inner.x, inner.y + 1, &person_line(&card_data.owner, w), inner.width);
}

fn render_branch(card_data: &BranchCard, area: Rect, buf: &mut Buf) {
    let inner = card("Branch", area, buf);
    let w = inner.width as usize;
    if inner.height < 6 {
        return;
    }
    let first_line = card_data.message.lines().next().unwrap_or("");
    let rows: [Line<'static>; 4] = [
        Line::from(secondary(&card_data.name, w)),
        Line::from(Span::styled("Head", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(
            truncate_with_ellipsis(&card_data.sha, w),
            Style::default().fg(theme::SHA_COLOR),
        )),
        Line::from(Span::raw(truncate_with_ellipsis(first_line, w))),
    ];
    for (i, line) in rows.iter().enumerate() {
        buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
    }
    for (i, person) in card_data.people.iter().take(2).enumerate() {
        buf.set_line(
            inner.x,
            inner.y + 4 + i as u16,
            &person_line(person, w),
            inner.width,
        );
    }
}

fn render_rate_limit(card_data: &RateLimitCard, area: Rect, buf: &mut Buf) {
    let inner = card("Rate Limit", area, buf);
    if inner.height < 5 {
        return;
    }
    let rows = [
        Line::from(Span::styled(card_data.resets.clone(), Style::default().fg(theme::DIM_TEXT))),
        Line::from(Span::raw(card_data.usage.clone())),
        Line::from(Span::styled("Last Request", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::raw(card_data.last_request.clone())),
    ];
    for (i, line) in rows.iter().enumerate() {
        buf.set_line(inner.x, inner.y + i as u16, line, inner.width);
    }
    Gauge::default()
        .gauge_style(Style::default().fg(theme::GAUGE_FG).bg(theme::GAUGE_BG))
        .ratio(card_data.ratio)
        .label("")
        .render(Rect::new(inner.x, inner.y + 4, inner.width, 1), buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Lookup;
    use crate::reconcile::FetchStatus;
    use crate::test_utils::sample_data;
    use crate::view::fragments;
    use chrono::{TimeZone, Utc};

    fn screen_text(buf: &Buf) -> String {
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn draw(frags: &[Fragment], height: u16) -> String {
        let area = Rect::new(0, 0, 70, height);
        let mut buf = Buf::empty(area);
        ResultPanel { fragments: frags }.render(area, &mut buf);
        screen_text(&buf)
    }

    #[test]
    fn draws_all_cards() {
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 25, 0).unwrap();
        let result = crate::lookup::LookupResult::Success(Lookup::from(sample_data()));
        let frags = fragments(FetchStatus::Settled, Some(&result), "main", now);
        let text = draw(&frags, 24);

        assert!(text.contains("Repository"));
        assert!(text.contains("rust-lang/rust"));
        assert!(text.contains("Merge pull request #1"));
        assert!(text.contains("Committer"));
        assert!(text.contains("Resets in 5 minutes"));
        assert!(text.contains("Usage: 10/5000"));
        assert!(text.contains("Cost: 1, nodes: 1"));
    }

    #[test]
    fn draws_error_link_with_target() {
        let frags = vec![Fragment::ErrorLink {
            text: "Not Found".into(),
            href: "https://docs.github.com/rest".into(),
        }];
        let text = draw(&frags, 2);
        assert!(text.contains("Not Found <https://docs.github.com/rest>"));
    }

    #[test]
    fn skips_cards_that_do_not_fit() {
        let frags = vec![
            Fragment::ErrorLabel("first".into()),
            Fragment::RateLimit(RateLimitCard {
                resets: "Already reset.".into(),
                usage: "Usage: 1/2".into(),
                last_request: "Cost: 1, nodes: 0".into(),
                ratio: 0.5,
            }),
        ];
        let text = draw(&frags, 4);
        assert!(text.contains("first"));
        assert!(!text.contains("Already reset."));
    }
}
