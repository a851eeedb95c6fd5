//! Main TUI application state machine.
//!
//! Handles:
//! - Form focus and input
//! - Submission through the assessment service
//! - Report download and session reset

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{ClassifierModel, FileReportExporter, ModelArtifacts, StandardScaler};
use crate::application::{Assessment, AssessmentService};
use crate::config::AppConfig;
use crate::ports::ReportExporter;
use crate::HeartGuardError;

use super::styles::StatusKind;
use super::ui::{
    form::{render_form, FieldId, FormState},
    render_disclaimer, render_footer, render_glossary, render_header,
    result::render_result,
};

/// Rows reserved for the verdict banner: border, headline, wrapped advice,
/// spacer and download hint.
const RESULT_HEIGHT: u16 = 8;

/// Assessment service over the artifact formats shipped with the app.
pub type ArtifactService = AssessmentService<ClassifierModel, StandardScaler>;

/// Where the session is in its two-state flow.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    AwaitingSubmission,
    /// The last submission's result, frozen at submit time.
    ResultDisplayed(Assessment),
}

/// One-line message shown in the footer until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// Main application state
pub struct App<E: ReportExporter = FileReportExporter> {
    service: ArtifactService,
    exporter: E,
    form: FormState,
    session: SessionState,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    /// Load the model artifacts named by `config` and build the app.
    ///
    /// # Errors
    /// Returns `HeartGuardError::Artifact` if any artifact is missing or
    /// invalid. Nothing is partially loaded.
    pub fn new(config: &AppConfig) -> crate::Result<Self> {
        let artifacts = ModelArtifacts::load(&config.model_path)?;
        let service = AssessmentService::from_artifacts(artifacts);
        Ok(Self::with_dependencies(
            service,
            FileReportExporter::new(&config.report_dir),
        ))
    }
}

impl<E> App<E>
where
    E: ReportExporter,
    E::Error: Into<HeartGuardError>,
{
    /// Create application with injected dependencies.
    pub fn with_dependencies(service: ArtifactService, exporter: E) -> Self {
        Self {
            service,
            exporter,
            form: FormState::default(),
            session: SessionState::AwaitingSubmission,
            status: None,
            should_quit: false,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail or a prediction cannot be
    /// computed. The terminal is restored either way.
    pub fn run(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers)?;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Draw the whole page.
    pub fn render(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Form + glossary
                Constraint::Length(3), // Help / status + keys
                Constraint::Length(1), // Disclaimer
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
            .split(rows[1]);

        render_header(f, rows[0]);
        match &self.session {
            SessionState::AwaitingSubmission => render_form(f, body[0], &self.form),
            SessionState::ResultDisplayed(assessment) => {
                // Verdict stays on screen; the form is clipped on short terminals.
                let main = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(RESULT_HEIGHT), Constraint::Min(0)])
                    .split(body[0]);
                render_result(f, main[0], assessment);
                render_form(f, main[1], &self.form);
            }
        }
        render_glossary(f, body[1]);

        let help = self
            .form
            .focused_field()
            .map_or("Press Enter to generate the risk analysis.", FieldId::help);
        render_footer(
            f,
            rows[2],
            help,
            self.status.as_ref().map(|s| (s.text.as_str(), s.kind)),
        );
        render_disclaimer(f, rows[3]);
    }

    /// Apply one key press.
    ///
    /// # Errors
    /// Returns the assessment error if submitting fails; such failures are
    /// fatal to the session.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> crate::Result<()> {
        let ctrl = modifiers.contains(KeyModifiers::CONTROL);
        self.status = None;

        match key {
            KeyCode::Char('q' | 'c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.reset(),
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::BackTab => self.form.prev_field(),
            KeyCode::Down | KeyCode::Tab => self.form.next_field(),
            KeyCode::Left => self.form.adjust(-1),
            KeyCode::Right => self.form.adjust(1),
            KeyCode::PageDown => self.form.adjust(-10),
            KeyCode::PageUp => self.form.adjust(10),
            KeyCode::Enter => self.submit()?,
            KeyCode::Char('d') | KeyCode::Char('D') if !ctrl => self.download(),
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.delete_char(),
            _ => {}
        }

        Ok(())
    }

    fn submit(&mut self) -> crate::Result<()> {
        self.form.commit();
        let observation = self.form.to_observation();
        let assessment = self.service.assess(&observation)?;
        self.session = SessionState::ResultDisplayed(assessment);
        Ok(())
    }

    fn download(&mut self) {
        let SessionState::ResultDisplayed(assessment) = &self.session else {
            self.set_status("Generate a risk analysis first.", StatusKind::Warning);
            return;
        };

        match self.exporter.export(&assessment.report.to_download()) {
            Ok(path) => {
                let text = format!("Report saved to {}", path.display());
                self.set_status(text, StatusKind::Success);
            }
            Err(e) => {
                let e: HeartGuardError = e.into();
                tracing::error!("{}", e);
                self.set_status(format!("Download failed: {e}"), StatusKind::Error);
            }
        }
    }

    /// Fresh page load: default widgets, no result.
    fn reset(&mut self) {
        self.form.reset();
        self.session = SessionState::AwaitingSubmission;
        tracing::info!("Session reset");
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LogisticClassifier;
    use crate::domain::{ExerciseAngina, ExpectedSchema, PredictionResult};
    use ratatui::backend::TestBackend;
    use std::path::Path;
    use tempfile::tempdir;

    /// High risk exactly when exercise angina is present.
    fn service() -> ArtifactService {
        let schema = ExpectedSchema::new(vec![
            "Age".into(),
            "MaxHR".into(),
            "ExerciseAngina_Y".into(),
        ])
        .expect("valid schema");
        let classifier = ClassifierModel::Logistic(LogisticClassifier {
            coefficients: vec![0.0, 0.0, 1.0],
            intercept: -0.5,
        });
        let scaler = StandardScaler::new(vec![0.0; 3], vec![1.0; 3]);
        let artifacts =
            ModelArtifacts::from_parts(classifier, scaler, schema).expect("Should assemble");
        AssessmentService::from_artifacts(artifacts)
    }

    fn app(report_dir: &Path) -> App {
        App::with_dependencies(service(), FileReportExporter::new(report_dir))
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE)
            .expect("Should handle key");
    }

    fn ctrl(app: &mut App, c: char) {
        app.handle_key(KeyCode::Char(c), KeyModifiers::CONTROL)
            .expect("Should handle key");
    }

    fn displayed(app: &App) -> &Assessment {
        match app.session() {
            SessionState::ResultDisplayed(assessment) => assessment,
            SessionState::AwaitingSubmission => panic!("expected a displayed result"),
        }
    }

    fn focus(app: &mut App, id: FieldId) {
        while app.form().focused_field() != Some(id) {
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_new_fails_without_artifacts() {
        let temp = tempdir().expect("tempdir");
        let config = AppConfig {
            model_path: temp.path().join("missing"),
            ..AppConfig::default()
        };

        let result = App::new(&config);
        assert!(matches!(result, Err(HeartGuardError::Artifact(_))));
    }

    #[test]
    fn test_submit_displays_result() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());
        assert_eq!(app.session(), &SessionState::AwaitingSubmission);

        press(&mut app, KeyCode::Enter);
        assert_eq!(displayed(&app).prediction, PredictionResult::HighRisk);
    }

    #[test]
    fn test_result_is_a_snapshot_until_resubmit() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());

        press(&mut app, KeyCode::Enter);
        focus(&mut app, FieldId::ExerciseAngina);
        press(&mut app, KeyCode::Right);

        let shown = displayed(&app);
        assert_eq!(shown.prediction, PredictionResult::HighRisk);
        assert_eq!(shown.observation().exercise_angina, ExerciseAngina::Yes);

        press(&mut app, KeyCode::Enter);
        let shown = displayed(&app);
        assert_eq!(shown.prediction, PredictionResult::LowRisk);
        assert_eq!(shown.observation().exercise_angina, ExerciseAngina::No);
    }

    #[test]
    fn test_ctrl_r_resets_session_and_form() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());

        focus(&mut app, FieldId::Age);
        press(&mut app, KeyCode::PageUp);
        press(&mut app, KeyCode::Enter);

        ctrl(&mut app, 'r');
        assert_eq!(app.session(), &SessionState::AwaitingSubmission);
        assert_eq!(app.form(), &FormState::default());
    }

    #[test]
    fn test_download_requires_result() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.status().map(|s| s.kind),
            Some(StatusKind::Warning)
        );
        assert!(!temp.path().join("HeartGuard_Risk_Report.txt").exists());
    }

    #[test]
    fn test_download_writes_report() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('D'));

        assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Success));
        let body = std::fs::read_to_string(temp.path().join("HeartGuard_Risk_Report.txt"))
            .expect("report written");
        assert!(body.contains("[HIGH RISK]"));
        assert!(body.contains("- Age: 40"));
    }

    #[test]
    fn test_download_failure_is_not_fatal() {
        let temp = tempdir().expect("tempdir");
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").expect("write");
        let mut app = app(&blocker);

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('d'));

        assert_eq!(app.status().map(|s| s.kind), Some(StatusKind::Error));
        assert!(matches!(app.session(), SessionState::ResultDisplayed(_)));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_quit_keys() {
        let temp = tempdir().expect("tempdir");

        let mut app1 = app(temp.path());
        press(&mut app1, KeyCode::Esc);
        assert!(app1.should_quit());

        let mut app2 = app(temp.path());
        ctrl(&mut app2, 'q');
        assert!(app2.should_quit());

        let mut app3 = app(temp.path());
        ctrl(&mut app3, 'c');
        assert!(app3.should_quit());
        assert_eq!(app3.form(), &FormState::default());
    }

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        terminal.draw(|f| app.render(f)).expect("draw");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_shows_verdict() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());

        let before = draw(&app, 160, 50);
        assert!(before.contains("Generate Risk Analysis"));
        assert!(!before.contains("High Risk Detected"));

        press(&mut app, KeyCode::Enter);
        let screen = draw(&app, 160, 50);
        assert!(screen.contains("HeartGuard AI"));
        assert!(screen.contains("High Risk Detected"));
        assert!(screen.contains("Medical Glossary"));
    }

    #[test]
    fn test_render_verdict_on_small_terminal() {
        let temp = tempdir().expect("tempdir");
        let mut app = app(temp.path());
        press(&mut app, KeyCode::Enter);

        for (width, height) in [(80, 24), (100, 30)] {
            let screen = draw(&app, width, height);
            assert!(screen.contains("High Risk Detected"), "{width}x{height}");
            assert!(screen.contains("Download Full Report"), "{width}x{height}");
        }

        focus(&mut app, FieldId::ExerciseAngina);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);
        assert!(draw(&app, 80, 24).contains("Low Risk Profile"));
    }
}
