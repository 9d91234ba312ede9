use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::action::{Action, Section};
use crate::app::{InputMode, Overlay};
use crate::tabs::Category;

/// Raw terminal events plus a periodic tick.
pub struct RawEventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
}

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

impl RawEventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    _ = tick.tick() => {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                    }
                    event = reader.next() => {
                        match event {
                            Some(Ok(Event::Key(key))) => {
                                if tx.send(AppEvent::Key(key)).is_err() {
                                    break;
                                }
                            }
                            Some(Ok(_)) => {}
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                }
            }
        });

        Self { rx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

/// Map a key event to an action based on current app state
pub fn key_to_action(
    key: KeyEvent,
    input_mode: &InputMode,
    overlay: &Overlay,
    input_buffer: &str,
) -> Option<Action> {
    if *overlay == Overlay::Help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::ToggleHelp),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Command => {
            return match key.code {
                KeyCode::Esc => Some(Action::CloseOverlay),
                KeyCode::Enter => Some(Action::SubmitCommandInput(input_buffer.to_string())),
                KeyCode::Tab => {
                    // Tab completion: fill with first matching command
                    let input_cmd = input_buffer.split_whitespace().next().unwrap_or("");
                    let matches = crate::input::commands::matching_commands(input_cmd);
                    matches
                        .first()
                        .map(|cmd| Action::UpdateInputBuffer(format!("{} ", cmd.name)))
                }
                KeyCode::Backspace => {
                    let mut buf = input_buffer.to_string();
                    buf.pop();
                    Some(Action::UpdateInputBuffer(buf))
                }
                KeyCode::Char(c) => {
                    let mut buf = input_buffer.to_string();
                    buf.push(c);
                    Some(Action::UpdateInputBuffer(buf))
                }
                _ => None,
            };
        }
        InputMode::PendingG => {
            return match key.code {
                KeyCode::Char('g') => Some(Action::ScrollTop),
                _ => Some(Action::CloseOverlay), // Cancel the pending chord
            };
        }
        InputMode::Normal => {}
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('d') => Some(Action::PageDown),
            KeyCode::Char('u') => Some(Action::PageUp),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char(':') => Some(Action::OpenCommandInput),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Char('g') => Some(Action::EnterPendingG),
        KeyCode::Char('G') => Some(Action::ScrollBottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Tab => Some(Action::NextSection),
        KeyCode::BackTab => Some(Action::PrevSection),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::NextTab),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevTab),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            Section::ALL.get(idx).copied().map(Action::SwitchSection)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn normal(code: KeyCode) -> Option<Action> {
        key_to_action(key(code), &InputMode::Normal, &Overlay::None, "")
    }

    #[test]
    fn digits_jump_to_sections() {
        assert!(matches!(
            normal(KeyCode::Char('3')),
            Some(Action::SwitchSection(Section::Activity))
        ));
        assert!(matches!(
            normal(KeyCode::Char('7')),
            Some(Action::SwitchSection(Section::Dashboard))
        ));
        assert!(normal(KeyCode::Char('9')).is_none());
    }

    #[test]
    fn tab_cycles_sections_and_hl_cycles_inner_tabs() {
        assert!(matches!(normal(KeyCode::Tab), Some(Action::NextSection)));
        assert!(matches!(normal(KeyCode::BackTab), Some(Action::PrevSection)));
        assert!(matches!(normal(KeyCode::Char('l')), Some(Action::NextTab)));
        assert!(matches!(normal(KeyCode::Char('h')), Some(Action::PrevTab)));
    }

    #[test]
    fn enter_and_esc_open_and_close_details() {
        assert!(matches!(normal(KeyCode::Enter), Some(Action::Select)));
        assert!(matches!(normal(KeyCode::Esc), Some(Action::Back)));
    }

    #[test]
    fn command_mode_edits_buffer() {
        let action = key_to_action(key(KeyCode::Char('t')), &InputMode::Command, &Overlay::None, "tea");
        assert!(matches!(action, Some(Action::UpdateInputBuffer(buf)) if buf == "teat"));

        let action = key_to_action(key(KeyCode::Enter), &InputMode::Command, &Overlay::None, "team");
        assert!(matches!(action, Some(Action::SubmitCommandInput(cmd)) if cmd == "team"));
    }

    #[test]
    fn command_mode_completes_on_tab() {
        let action = key_to_action(key(KeyCode::Tab), &InputMode::Command, &Overlay::None, "sig");
        assert!(matches!(action, Some(Action::UpdateInputBuffer(buf)) if buf == "signout "));
    }

    #[test]
    fn help_overlay_swallows_navigation() {
        assert!(key_to_action(key(KeyCode::Char('j')), &InputMode::Normal, &Overlay::Help, "").is_none());
        assert!(matches!(
            key_to_action(key(KeyCode::Esc), &InputMode::Normal, &Overlay::Help, ""),
            Some(Action::ToggleHelp)
        ));
    }

    #[test]
    fn gg_chord_scrolls_to_top() {
        let action = key_to_action(key(KeyCode::Char('g')), &InputMode::PendingG, &Overlay::None, "");
        assert!(matches!(action, Some(Action::ScrollTop)));
    }
}
