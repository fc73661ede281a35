//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    if let Some(form) = app.state.form.as_form() {
        forms::draw_form(frame, main_area, form);
    }

    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackendClientTrait;
    use crate::state::FormLaunch;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_login_shows_required_messages() {
        let mut app = App::new(Arc::new(MockBackendClientTrait::new()), FormLaunch::Login);
        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let screen = render(&app);
        assert!(screen.contains("Username"));
        assert!(screen.contains("*required"));
    }

    #[tokio::test]
    async fn test_password_is_masked() {
        let mut app = App::new(Arc::new(MockBackendClientTrait::new()), FormLaunch::Login);
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        for c in "hunter22".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let screen = render(&app);
        assert!(!screen.contains("hunter22"));
        assert!(screen.contains("••••••••"));
    }
}
