//! # Hidden Password Entry
//!
//! Reads the login password from an interactive terminal in raw mode so the
//! typed characters are never echoed. Piped input does not go through here.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Result of feeding one key to the line being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Submit,
    Abort,
}

/// Read one line without echo. `None` when the user aborts with Ctrl-C or
/// Ctrl-D on an empty line.
///
/// Blocks; call it from `spawn_blocking`.
pub fn read_hidden_line() -> std::io::Result<Option<String>> {
    terminal::enable_raw_mode()?;
    let result = read_keys();
    let restored = terminal::disable_raw_mode();
    let line = result?;
    restored?;
    Ok(line)
}

fn read_keys() -> std::io::Result<Option<String>> {
    let mut line = String::new();
    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match apply_key(&mut line, key) {
            KeyOutcome::Continue => {}
            KeyOutcome::Submit => return Ok(Some(line)),
            KeyOutcome::Abort => return Ok(None),
        }
    }
}

fn apply_key(line: &mut String, key: KeyEvent) -> KeyOutcome {
    if key.kind == KeyEventKind::Release {
        return KeyOutcome::Continue;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Char('c') if ctrl => KeyOutcome::Abort,
        KeyCode::Char('d') if ctrl && line.is_empty() => KeyOutcome::Abort,
        KeyCode::Char('u') if ctrl => {
            line.clear();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            line.push(c);
            KeyOutcome::Continue
        }
        KeyCode::Backspace => {
            line.pop();
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_keys(keys: &[KeyEvent]) -> (String, KeyOutcome) {
        let mut line = String::new();
        let mut outcome = KeyOutcome::Continue;
        for key in keys {
            outcome = apply_key(&mut line, *key);
            if outcome != KeyOutcome::Continue {
                break;
            }
        }
        (line, outcome)
    }

    #[test]
    fn test_typed_characters_are_collected() {
        let keys = [
            press(KeyCode::Char('p')),
            press(KeyCode::Char('w')),
            press(KeyCode::Char('!')),
            press(KeyCode::Enter),
        ];
        assert_eq!(type_keys(&keys), ("pw!".to_string(), KeyOutcome::Submit));
    }

    #[test]
    fn test_backspace_and_clear_line() {
        let keys = [
            press(KeyCode::Char('a')),
            press(KeyCode::Char('b')),
            press(KeyCode::Backspace),
            press(KeyCode::Char('c')),
            press(KeyCode::Enter),
        ];
        assert_eq!(type_keys(&keys).0, "ac");

        let keys = [press(KeyCode::Char('x')), ctrl('u'), press(KeyCode::Char('y')), press(KeyCode::Enter)];
        assert_eq!(type_keys(&keys).0, "y");
    }

    #[test]
    fn test_ctrl_c_aborts() {
        let keys = [press(KeyCode::Char('a')), ctrl('c')];
        assert_eq!(type_keys(&keys).1, KeyOutcome::Abort);
    }

    #[test]
    fn test_ctrl_d_aborts_only_on_empty_line() {
        assert_eq!(type_keys(&[ctrl('d')]).1, KeyOutcome::Abort);

        let keys = [press(KeyCode::Char('a')), ctrl('d'), press(KeyCode::Enter)];
        assert_eq!(type_keys(&keys), ("a".to_string(), KeyOutcome::Submit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = press(KeyCode::Char('a'));
        release.kind = KeyEventKind::Release;
        let keys = [press(KeyCode::Char('a')), release, press(KeyCode::Enter)];
        assert_eq!(type_keys(&keys).0, "a");
    }
}
