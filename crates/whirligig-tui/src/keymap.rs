use crossterm::event::KeyCode;
use tracing::warn;

/// DOM-style name for a terminal key, as carried by `KeyUp` signals
///
/// Arrows become "ArrowLeft"/"ArrowRight"/..., printable characters map to
/// themselves and space is " ".
pub fn key_name(code: KeyCode) -> Option<String> {
    let name = match code {
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Tab | KeyCode::BackTab => "Tab",
        KeyCode::Backspace => "Backspace",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        KeyCode::F(n) => return Some(format!("F{}", n)),
        KeyCode::Char(c) => return Some(c.to_string()),
        _ => return None,
    };
    Some(name.to_string())
}

/// Inverse of [`key_name`]
pub fn parse_key_name(name: &str) -> Option<KeyCode> {
    match name {
        "ArrowLeft" => Some(KeyCode::Left),
        "ArrowRight" => Some(KeyCode::Right),
        "ArrowUp" => Some(KeyCode::Up),
        "ArrowDown" => Some(KeyCode::Down),
        "Enter" => Some(KeyCode::Enter),
        "Escape" => Some(KeyCode::Esc),
        "Tab" => Some(KeyCode::Tab),
        "Backspace" => Some(KeyCode::Backspace),
        "Delete" => Some(KeyCode::Delete),
        "Insert" => Some(KeyCode::Insert),
        "Home" => Some(KeyCode::Home),
        "End" => Some(KeyCode::End),
        "PageUp" => Some(KeyCode::PageUp),
        "PageDown" => Some(KeyCode::PageDown),
        _ => {
            if let Some(n) = name.strip_prefix('F').and_then(|n| n.parse::<u8>().ok()) {
                return Some(KeyCode::F(n));
            }
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

/// Warn about configured key names a terminal can never produce
pub fn validate_keys(keys: &[String]) -> usize {
    let mut invalid = 0;
    for key in keys {
        if parse_key_name(key).is_none() {
            warn!("Invalid key name: '{}', it will never match", key);
            invalid += 1;
        }
    }
    invalid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_names() {
        assert_eq!(key_name(KeyCode::Right).as_deref(), Some("ArrowRight"));
        assert_eq!(key_name(KeyCode::Left).as_deref(), Some("ArrowLeft"));
        assert_eq!(key_name(KeyCode::Up).as_deref(), Some("ArrowUp"));
    }

    #[test]
    fn test_char_and_special_names() {
        assert_eq!(key_name(KeyCode::Char('l')).as_deref(), Some("l"));
        assert_eq!(key_name(KeyCode::Char(' ')).as_deref(), Some(" "));
        assert_eq!(key_name(KeyCode::Esc).as_deref(), Some("Escape"));
        assert_eq!(key_name(KeyCode::F(5)).as_deref(), Some("F5"));
        assert_eq!(key_name(KeyCode::Null), None);
    }

    #[test]
    fn test_parse_key_name() {
        assert_eq!(parse_key_name("ArrowRight"), Some(KeyCode::Right));
        assert_eq!(parse_key_name("PageDown"), Some(KeyCode::PageDown));
        assert_eq!(parse_key_name("F12"), Some(KeyCode::F(12)));
        assert_eq!(parse_key_name("j"), Some(KeyCode::Char('j')));
        assert_eq!(parse_key_name("Right"), None);
        assert_eq!(parse_key_name(""), None);
    }

    #[test]
    fn test_validate_keys() {
        let keys = vec![
            "ArrowRight".to_string(),
            "l".to_string(),
            "NextSlide".to_string(),
        ];
        assert_eq!(validate_keys(&keys), 1);
    }
}
