//! Key mapping for llama
//!
//! Parses the key strings of the `[keys]` config table into crossterm keys and
//! maps them to the actions the session state machine understands.

use crate::config::Config;
use crate::core::Direction;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    System(SystemAction),
}

/// Cursor movement and directory navigation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    Move(Direction),
    GoParent,
}

/// Actions on the selected entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    /// Enter a directory or open a file in the editor.
    Open,
}

/// Mode switches and exits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Search,
    TogglePreview,
    Quit,
    ForceQuit,
}

/// Key + modifiers as used in the keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, built from the config
#[derive(Debug, Default)]
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use SystemAction as S;

        // NavActions
        bind!(keys.up(),          Action::Nav(N::Move(Direction::Up)));
        bind!(keys.down(),        Action::Nav(N::Move(Direction::Down)));
        bind!(keys.left(),        Action::Nav(N::Move(Direction::Left)));
        bind!(keys.right(),       Action::Nav(N::Move(Direction::Right)));
        bind!(keys.top(),         Action::Nav(N::Move(Direction::Top)));
        bind!(keys.bottom(),      Action::Nav(N::Move(Direction::Bottom)));
        bind!(keys.leftmost(),    Action::Nav(N::Move(Direction::Leftmost)));
        bind!(keys.rightmost(),   Action::Nav(N::Move(Direction::Rightmost)));
        bind!(keys.back(),        Action::Nav(N::GoParent));

        // FileActions
        bind!(keys.open(),        Action::File(FileAction::Open));

        // SystemActions
        bind!(keys.search(),      Action::System(S::Search));
        bind!(keys.preview(),     Action::System(S::TogglePreview));
        bind!(keys.quit(),        Action::System(S::Quit));
        bind!(keys.force_quit(),  Action::System(S::ForceQuit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    ///
    /// Character keys also match without SHIFT, since terminals report `G` as
    /// shift+g while the config writes it as `"G"`.
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Parses a key string such as `"k"`, `"Shift+Up"`, `"Ctrl+c"`, `"<c-c>"` or `"Space"`.
pub fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    // Single characters are taken literally, so "-" and "+" can be bound.
    let mut single = s.chars();
    if let (Some(c), None) = (single.next(), single.next()) {
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    for part in input.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "enter" | "return" => code = Some(KeyCode::Enter),
            "esc" | "escape" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),
            "slash" => code = Some(KeyCode::Char('/')),

            _ => {
                let mut chars = part.chars();
                if let (Some(c), None) = (chars.next(), chars.clone().next()) {
                    // Ctrl+C arrives as Char('c') with CONTROL
                    let c = if modifiers.contains(KeyModifiers::CONTROL) {
                        c.to_ascii_lowercase()
                    } else {
                        c
                    };
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    // SHIFT on a letter is expressed by the uppercase char itself
    if let Some(KeyCode::Char(c)) = code
        && modifiers.contains(KeyModifiers::SHIFT)
        && c.is_alphabetic()
    {
        modifiers -= KeyModifiers::SHIFT;
        code = Some(KeyCode::Char(c.to_ascii_uppercase()));
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => eprintln!("[llama] Warning: ignoring invalid key binding {:?}", k),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn parse_key_variants() {
        assert_eq!(
            parse_key("Shift+Up"),
            Some(Key {
                code: KeyCode::Up,
                modifiers: KeyModifiers::SHIFT
            })
        );
        assert_eq!(
            parse_key("Ctrl+c"),
            Some(Key {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL
            })
        );
        assert_eq!(parse_key("<c-c>"), parse_key("Ctrl+c"));
        assert_eq!(parse_key("Space").map(|k| k.code), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("/").map(|k| k.code), Some(KeyCode::Char('/')));
        assert_eq!(parse_key("G").map(|k| k.code), Some(KeyCode::Char('G')));
        assert_eq!(parse_key("shift+g"), parse_key("G"));
        assert_eq!(parse_key("F5").map(|k| k.code), Some(KeyCode::F(5)));
        assert_eq!(parse_key("Hyper+x"), None);
        assert_eq!(parse_key("<x-c>"), None);
    }

    #[test]
    fn default_keymap_lookup() {
        let keymap = Keymap::from_config(&Config::default());

        assert_eq!(
            keymap.lookup(key(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::Move(Direction::Up)))
        );
        assert_eq!(
            keymap.lookup(key(KeyCode::Up, KeyModifiers::SHIFT)),
            Some(Action::Nav(NavAction::Move(Direction::Top)))
        );
        // terminals report uppercase letters with SHIFT
        assert_eq!(
            keymap.lookup(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::Nav(NavAction::Move(Direction::Bottom)))
        );
        assert_eq!(
            keymap.lookup(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::System(SystemAction::ForceQuit))
        );
        assert_eq!(
            keymap.lookup(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::System(SystemAction::TogglePreview))
        );
        assert_eq!(
            keymap.lookup(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(Action::Nav(NavAction::GoParent))
        );
        assert_eq!(keymap.lookup(key(KeyCode::Char('c'), KeyModifiers::NONE)), None);
    }
}
