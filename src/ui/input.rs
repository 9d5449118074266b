use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Char(char),
    Backspace,
    ClearDraft,
    Commit,
    NextField,
    PrevField,
    Quit,
    None,
}

pub fn map_key(key: KeyEvent) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('u') if ctrl => Action::ClearDraft,
        KeyCode::Char(_) if ctrl => Action::None,
        KeyCode::Char(c) => Action::Char(c),
        KeyCode::Esc => Action::Quit,
        KeyCode::Enter => Action::Commit,
        KeyCode::Backspace => Action::Backspace,
        KeyCode::Tab | KeyCode::Down => Action::NextField,
        KeyCode::BackTab | KeyCode::Up => Action::PrevField,
        _ => Action::None,
    }
}
