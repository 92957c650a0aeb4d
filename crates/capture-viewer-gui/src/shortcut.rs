//! Key-combination text (`"F10"`, `"Ctrl+Shift+S"`) → [`egui::KeyboardShortcut`].

use egui::{Key, KeyboardShortcut, Modifiers};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("shortcut is empty")]
    Empty,

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("unknown key '{0}'")]
    UnknownKey(String),
}

/// Parses `Mod+Mod+Key`. Modifiers are case-insensitive; the key accepts any
/// name egui knows, in any case.
pub fn parse_shortcut(text: &str) -> Result<KeyboardShortcut, ShortcutError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ShortcutError::Empty);
    }

    // A trailing "+" after a separator (or on its own) is the plus key:
    // "+", "++", "Ctrl++".
    let (mods, key_name) = match text.strip_suffix('+') {
        Some(head) => {
            let head = head.trim_end();
            match head.strip_suffix('+') {
                Some(mods) => (mods, "Plus"),
                None if head.is_empty() => ("", "Plus"),
                None => return Err(ShortcutError::Empty),
            }
        }
        None => text.rsplit_once('+').map_or(("", text), |(mods, key)| (mods, key.trim())),
    };
    if key_name.is_empty() {
        return Err(ShortcutError::Empty);
    }

    let mut modifiers = Modifiers::NONE;
    if !mods.trim().is_empty() {
        for part in mods.split('+') {
            modifiers = modifiers | parse_modifier(part.trim())?;
        }
    }

    let key = parse_key(key_name).ok_or_else(|| ShortcutError::UnknownKey(key_name.to_owned()))?;
    Ok(KeyboardShortcut::new(modifiers, key))
}

fn parse_modifier(name: &str) -> Result<Modifiers, ShortcutError> {
    match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Ok(Modifiers::CTRL),
        "shift" => Ok(Modifiers::SHIFT),
        "alt" | "option" => Ok(Modifiers::ALT),
        "cmd" | "command" | "meta" => Ok(Modifiers::COMMAND),
        _ => Err(ShortcutError::UnknownModifier(name.to_owned())),
    }
}

fn parse_key(name: &str) -> Option<Key> {
    Key::from_name(name)
        .or_else(|| Key::from_name(&name.to_ascii_uppercase()))
        .or_else(|| Key::from_name(&capitalize(name)))
}

fn capitalize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_function_key() {
        let sc = parse_shortcut("F10").unwrap();
        assert_eq!(sc.logical_key, Key::F10);
        assert_eq!(sc.modifiers, Modifiers::NONE);
    }

    #[test]
    fn modifiers_and_case() {
        let sc = parse_shortcut("ctrl+Shift+s").unwrap();
        assert_eq!(sc.logical_key, Key::S);
        assert_eq!(sc.modifiers, Modifiers::CTRL | Modifiers::SHIFT);

        let sc = parse_shortcut(" Alt + f4 ").unwrap();
        assert_eq!(sc.logical_key, Key::F4);
        assert_eq!(sc.modifiers, Modifiers::ALT);

        let sc = parse_shortcut("space").unwrap();
        assert_eq!(sc.logical_key, Key::Space);
    }

    #[test]
    fn trailing_plus_is_the_plus_key() {
        let sc = parse_shortcut("Ctrl++").unwrap();
        assert_eq!(sc.logical_key, Key::Plus);
        assert_eq!(sc.modifiers, Modifiers::CTRL);

        let sc = parse_shortcut("Ctrl + Shift + +").unwrap();
        assert_eq!(sc.logical_key, Key::Plus);
        assert_eq!(sc.modifiers, Modifiers::CTRL | Modifiers::SHIFT);
    }

    #[test]
    fn bare_plus_is_the_plus_key() {
        for text in ["+", "++", " ++ "] {
            let sc = parse_shortcut(text).unwrap();
            assert_eq!(sc.logical_key, Key::Plus, "{text:?}");
            assert_eq!(sc.modifiers, Modifiers::NONE, "{text:?}");
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_shortcut(""), Err(ShortcutError::Empty));
        assert_eq!(parse_shortcut("   "), Err(ShortcutError::Empty));
        assert_eq!(parse_shortcut("Ctrl+"), Err(ShortcutError::Empty));
        assert_eq!(
            parse_shortcut("Hyper+A"),
            Err(ShortcutError::UnknownModifier("Hyper".into()))
        );
        assert_eq!(
            parse_shortcut("Ctrl++A"),
            Err(ShortcutError::UnknownModifier(String::new()))
        );
        assert_eq!(
            parse_shortcut("Ctrl+Banana"),
            Err(ShortcutError::UnknownKey("Banana".into()))
        );
    }
}
