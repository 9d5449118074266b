use crate::config::{ApiFlavor, Config};
use crate::event::AppEvent;
use crate::form::{FieldName, InputForm};
use crate::reconcile::{FetchTicket, Reconciler};
use crate::ui::{
    form_panel::FormPanel,
    input::{self, Action},
    result_panel::ResultPanel,
    status_bar::StatusBar,
};
use crate::view;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub struct App {
    pub config: Config,
    pub form: InputForm,
    pub reconciler: Reconciler,
    pending: Option<FetchTicket>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config, form: InputForm) -> Self {
        let mut app = Self {
            config,
            form,
            reconciler: Reconciler::new(),
            pending: None,
            should_quit: false,
        };
        app.reconcile();
        app
    }

    /// The lookup the event loop should start next, if any.
    pub fn take_pending_fetch(&mut self) -> Option<FetchTicket> {
        self.pending.take()
    }

    fn reconcile(&mut self) {
        if let Some(ticket) = self.reconciler.on_tuple_change(self.form.tuple()) {
            self.pending = Some(ticket);
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key);
                self.handle_action(action);
            }
            AppEvent::Resize => {}
            AppEvent::LookupDone {
                generation,
                outcome,
            } => {
                self.reconciler.settle(generation, outcome);
            }
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Char(c) => self.form.push_char(c),
            Action::Backspace => self.form.backspace(),
            Action::ClearDraft => self.form.clear_draft(),
            Action::Commit => {
                self.form.commit_focused();
                self.reconcile();
            }
            Action::NextField => {
                self.form.focus(self.form.focused.next());
                self.reconcile();
            }
            Action::PrevField => {
                self.form.focus(self.form.focused.prev());
                self.reconcile();
            }
            Action::None => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FieldName::ALL.len() as u16 + 2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(size);

        frame.render_widget(FormPanel { form: &self.form }, chunks[0]);

        // The result on screen belongs to the issued lookup, not to the drafts.
        let issued = self.reconciler.issued();
        let fragments = view::fragments(
            self.reconciler.status(),
            self.reconciler.result(),
            issued.map(|t| t.branch.as_str()).unwrap_or_default(),
            chrono::Utc::now(),
        );
        frame.render_widget(ResultPanel { fragments: &fragments }, chunks[1]);

        let target = issued
            .map(|t| format!("{}@{}", t.repo_path(), t.branch))
            .unwrap_or_default();
        let api = match self.config.api {
            ApiFlavor::Graphql => "graphql",
            ApiFlavor::Rest => "rest",
        };
        frame.render_widget(
            StatusBar {
                status: self.reconciler.status(),
                target: &target,
                api,
            },
            chunks[2],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupResult;
    use crate::reconcile::FetchStatus;
    use crate::store::MemoryStore;
    use crate::test_utils::sample_data;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn clear_draft(app: &mut App) {
        app.handle_event(AppEvent::Key(KeyEvent::new(
            KeyCode::Char('u'),
            KeyModifiers::CONTROL,
        )));
    }

    fn screen_text(app: &mut App) -> String {
        let backend = ratatui::backend::TestBackend::new(100, 40);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn new_app(token: Option<&str>) -> App {
        let form = InputForm::new(Box::new(MemoryStore::default()), token);
        App::new(Config::default(), form)
    }

    #[test]
    fn filling_all_fields_issues_one_fetch() {
        let mut app = new_app(Some("ghp_x"));
        type_text(&mut app, "rust-lang");
        press(&mut app, KeyCode::Tab);
        assert!(app.take_pending_fetch().is_none());
        type_text(&mut app, "rust");
        press(&mut app, KeyCode::Tab);
        assert!(app.take_pending_fetch().is_none());
        type_text(&mut app, "main");
        press(&mut app, KeyCode::Enter);

        let ticket = app.take_pending_fetch().expect("fetch issued");
        assert_eq!(ticket.tuple.repo_path(), "rust-lang/rust");
        assert_eq!(app.reconciler.status(), FetchStatus::Loading);

        // blur without changes
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.take_pending_fetch().is_none());
    }

    #[test]
    fn completion_settles_reconciler() {
        let mut app = new_app(Some("ghp_x"));
        app.form.prefill(FieldName::Owner, "o");
        app.form.prefill(FieldName::Repo, "r");
        app.form.prefill(FieldName::Branch, "b");
        press(&mut app, KeyCode::Enter);
        let ticket = app.take_pending_fetch().expect("fetch issued");

        app.handle_event(AppEvent::LookupDone {
            generation: ticket.generation,
            outcome: Ok(json!({ "Error": "Bad credentials" })),
        });
        assert_eq!(app.reconciler.status(), FetchStatus::Settled);
        assert_eq!(
            app.reconciler.result(),
            Some(&LookupResult::GraphqlError("Bad credentials".into()))
        );
    }

    #[test]
    fn missing_branch_notice_names_the_looked_up_branch() {
        let mut app = new_app(Some("ghp_x"));
        app.form.prefill(FieldName::Owner, "o");
        app.form.prefill(FieldName::Repo, "r");
        app.form.prefill(FieldName::Branch, "missing");
        press(&mut app, KeyCode::Enter);
        let ticket = app.take_pending_fetch().expect("fetch issued");

        let mut data = sample_data();
        data.branch = None;
        app.handle_event(AppEvent::LookupDone {
            generation: ticket.generation,
            outcome: Ok(json!({ "Data": data })),
        });

        // owner cleared, then a different branch committed
        clear_draft(&mut app);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        clear_draft(&mut app);
        type_text(&mut app, "main");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.tuple().branch, "main");
        assert!(app.take_pending_fetch().is_none());

        let text = screen_text(&mut app);
        assert!(text.contains("Could not find branch missing"));
        assert!(!text.contains("Could not find branch main"));
        assert!(text.contains("o/r@missing"));
    }

    #[test]
    fn escape_quits() {
        let mut app = new_app(None);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn renders_into_test_backend() {
        let mut app = new_app(None);
        let text = screen_text(&mut app);
        assert!(text.contains("Owner"));
        assert!(text.contains("idle"));
    }
}
