use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Up,
    Down,
    /// Tab - move focus between the difficulty and category selectors.
    SwitchFocus,
    /// Enter - choose the highlighted entry or submit the highlighted answer.
    Confirm,
    /// 's' - start a game from the selection screen.
    Start,
    /// 'n' or Right - advance to the next question.
    Next,
    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(Event::Key(key)) => {
            log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
                (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
                (_, KeyCode::Up) => Some(TuiEvent::Up),
                (_, KeyCode::Char('k')) => Some(TuiEvent::Up),
                (_, KeyCode::Down) => Some(TuiEvent::Down),
                (_, KeyCode::Char('j')) => Some(TuiEvent::Down),
                (_, KeyCode::Tab) => Some(TuiEvent::SwitchFocus),
                (_, KeyCode::Enter) => Some(TuiEvent::Confirm),
                (_, KeyCode::Char('s')) => Some(TuiEvent::Start),
                (_, KeyCode::Char('n')) => Some(TuiEvent::Next),
                (_, KeyCode::Right) => Some(TuiEvent::Next),
                _ => None,
            }
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        _ => None,
    }
}
