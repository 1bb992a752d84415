use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Direction, Layout, Rect},
};
use visitcast_core::error::{DataLoadError, DatasetError};

use crate::components::{Component, EventResult, status_bar::StatusBar, tab_bar::TabBar};
use crate::config::{AppConfig, DatasetSource};
use crate::screens::{gwr::GwrScreen, predictor::PredictorScreen, urban_rural::UrbanRuralScreen};
use crate::state::{AppState, TabId};
use crate::worker::{DatasetRequest, DatasetResponse, DatasetWorker};

/// How long the loop waits for input before polling the loader again
const TICK: Duration = Duration::from_millis(100);

pub struct App {
    state: AppState,
    tab_bar: TabBar,
    status_bar: StatusBar,
    predictor_screen: PredictorScreen,
    gwr_screen: GwrScreen,
    urban_rural_screen: UrbanRuralScreen,
    worker: DatasetWorker,
}

impl App {
    /// Build the app and start loading the dataset in the background
    pub fn new(config: &AppConfig, data_dir: PathBuf, source: DatasetSource) -> Self {
        let state = AppState::new(config, data_dir, source.to_string());
        let worker = DatasetWorker::new();

        let mut app = Self {
            state,
            tab_bar: TabBar,
            status_bar: StatusBar::new(),
            predictor_screen: PredictorScreen::new(),
            gwr_screen: GwrScreen::new(),
            urban_rural_screen: UrbanRuralScreen::new(),
            worker,
        };

        let label = source.to_string();
        if !app.worker.send(DatasetRequest::Load(source)) {
            tracing::error!("dataset worker is not running");
            app.state.dataset_loaded(label, Err(worker_gone()));
        }
        app
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        while !self.state.exit {
            self.poll_worker();
            self.state.refresh_evaluation();
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_events()?;
        }
        Ok(())
    }

    fn poll_worker(&mut self) {
        if let Some(DatasetResponse::Finished { source, result }) = self.worker.try_recv() {
            self.state.dataset_loaded(source.to_string(), result);
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Tab bar
                Constraint::Min(0),    // Content
                Constraint::Length(2), // Status bar
            ])
            .split(frame.area());

        self.tab_bar.render(frame, chunks[0], &self.state);

        self.render_active_screen(frame, chunks[1]);

        self.status_bar.render(frame, chunks[2], &self.state);
    }

    fn render_active_screen(&mut self, frame: &mut Frame, area: Rect) {
        match self.state.active_tab {
            TabId::Predictor => self.predictor_screen.render(frame, area, &self.state),
            TabId::GwrAnalysis => self.gwr_screen.render(frame, area, &self.state),
            TabId::UrbanRural => self.urban_rural_screen.render(frame, area, &self.state),
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if !event::poll(TICK)? {
            return Ok(());
        }
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)
            }
            _ => {}
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') if key_event.modifiers.is_empty() => {
                self.state.exit = true;
                return;
            }
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.state.exit = true;
                return;
            }
            KeyCode::Esc => {
                self.state.clear_error();
                self.state.status_message = None;
                return;
            }
            _ => {}
        }

        let result = self.tab_bar.handle_key(key_event, &mut self.state);
        if result != EventResult::NotHandled {
            return;
        }

        let result = match self.state.active_tab {
            TabId::Predictor => self
                .predictor_screen
                .handle_key(key_event, &mut self.state),
            TabId::GwrAnalysis => self.gwr_screen.handle_key(key_event, &mut self.state),
            TabId::UrbanRural => self
                .urban_rural_screen
                .handle_key(key_event, &mut self.state),
        };

        if result == EventResult::Exit {
            self.state.exit = true
        }
    }
}

fn worker_gone() -> DatasetError {
    DataLoadError::Transport("dataset loader is not running".to_string()).into()
}
