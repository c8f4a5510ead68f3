use ratatui::Frame;

use crate::{ui::schedule_view::render_schedule, App, AppState};

/// A UI Screen boundary: responsible for rendering the current state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Session screen - renders the live timer UI using the App widget
pub struct SessionScreen;

impl Screen for SessionScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Summary screen - renders the wrap-up UI using the App widget
pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Schedule screen - uses dedicated renderer
pub struct ScheduleScreen;

impl Screen for ScheduleScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        render_schedule(app, f);
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Session => Box::new(SessionScreen),
        AppState::Summary => Box::new(SummaryScreen),
        AppState::Schedule => Box::new(ScheduleScreen),
    }
}
