//! Keyboard Shortcut Utilities
//!
//! Global keyboard shortcuts using a document-level keydown listener.
//! `Ctrl` and `Meta` both count as the primary modifier so bindings work the
//! same on every platform.

use std::fmt;

use wasm_bindgen::JsCast;

/// A normalized key combination
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    /// Lowercased key value (`"k"`, `"?"`, `"escape"`, `"arrowup"`)
    pub key: String,
    pub primary: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Chord {
    pub fn new(key: &str, primary: bool, alt: bool, shift: bool) -> Self {
        let key = normalize_key(key);
        // Printable symbols already encode shift in the character itself
        let mut chars = key.chars();
        let shift = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_alphabetic() => false,
            _ => shift,
        };
        Self { key, primary, alt, shift }
    }

    /// Plain key without modifiers
    pub fn key(key: &str) -> Self {
        Self::new(key, false, false, false)
    }

    /// Parse a declarative binding such as `"Ctrl+K"`, `"Shift+Tab"` or `"+"`
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return None;
        }

        let (mods, key) = if spec == "+" {
            ("", "+")
        } else if let Some(rest) = spec.strip_suffix("++") {
            (rest, "+")
        } else {
            match spec.rsplit_once('+') {
                Some((mods, key)) => (mods, key),
                None => ("", spec),
            }
        };
        if key.is_empty() {
            return None;
        }

        let (mut primary, mut alt, mut shift) = (false, false, false);
        for m in mods.split('+').map(str::trim).filter(|m| !m.is_empty()) {
            match m.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" | "mod" => primary = true,
                "alt" | "option" => alt = true,
                "shift" => shift = true,
                _ => return None,
            }
        }
        Some(Self::new(key, primary, alt, shift))
    }

    /// Build from a browser keyboard event
    pub fn from_event(ev: &web_sys::KeyboardEvent) -> Self {
        Self::new(&ev.key(), ev.ctrl_key() || ev.meta_key(), ev.alt_key(), ev.shift_key())
    }

    pub fn is_escape(&self) -> bool {
        self.key == "escape"
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.primary {
            write!(f, "Ctrl+")?;
        }
        if self.alt {
            write!(f, "Alt+")?;
        }
        if self.shift {
            write!(f, "Shift+")?;
        }
        match self.key.as_str() {
            "escape" => write!(f, "Esc"),
            " " => write!(f, "Space"),
            k if k.chars().count() == 1 => write!(f, "{}", k.to_uppercase()),
            k => {
                let mut chars = k.chars();
                match chars.next() {
                    Some(first) => write!(f, "{}{}", first.to_uppercase(), chars.as_str()),
                    None => Ok(()),
                }
            }
        }
    }
}

fn normalize_key(key: &str) -> String {
    match key.to_lowercase().as_str() {
        "esc" => "escape".to_string(),
        "space" | "spacebar" => " ".to_string(),
        "plus" => "+".to_string(),
        other => other.to_string(),
    }
}

/// Whether the event target is a text-entry element
fn is_text_entry(ev: &web_sys::KeyboardEvent) -> bool {
    let Some(target) = ev.target() else { return false };
    let Some(el) = target.dyn_ref::<web_sys::Element>() else { return false };
    if matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT") {
        return true;
    }
    el.dyn_ref::<web_sys::HtmlElement>()
        .map(|html| html.is_content_editable())
        .unwrap_or(false)
}

/// Bind a document-level keydown handler.
///
/// The handler returns `true` when it consumed the chord; the browser default
/// is then prevented. Keys typed into text fields are skipped unless the
/// primary modifier is held or the key is Escape.
pub fn bind_global_keydown<F>(handler: F)
where
    F: Fn(&Chord) -> bool + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_keydown = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let chord = Chord::from_event(&ev);
        if is_text_entry(&ev) && !chord.primary && !chord.is_escape() {
            return;
        }
        if handler(&chord) {
            ev.prevent_default();
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
    on_keydown.forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifier_chords() {
        let chord = Chord::parse("Ctrl+K").unwrap();
        assert_eq!(chord, Chord::new("k", true, false, false));
        assert_eq!(Chord::parse("cmd+k"), Some(chord));
        assert_eq!(Chord::parse("Shift+Tab"), Some(Chord::new("Tab", false, false, true)));
    }

    #[test]
    fn parses_plus_key() {
        assert_eq!(Chord::parse("+"), Some(Chord::key("+")));
        assert_eq!(Chord::parse("Ctrl++"), Some(Chord::new("+", true, false, false)));
    }

    #[test]
    fn rejects_unknown_modifiers_and_empty() {
        assert_eq!(Chord::parse("Hyper+K"), None);
        assert_eq!(Chord::parse(""), None);
        assert_eq!(Chord::parse("Ctrl+"), None);
    }

    #[test]
    fn shift_is_dropped_for_symbols() {
        // Browsers report `?` with shift held on most layouts
        assert_eq!(Chord::new("?", false, false, true), Chord::key("?"));
        assert_ne!(Chord::new("K", false, false, true), Chord::key("k"));
    }

    #[test]
    fn normalizes_aliases() {
        assert!(Chord::key("Esc").is_escape());
        assert!(Chord::key("Escape").is_escape());
        assert_eq!(Chord::key("Space").key, " ");
    }

    #[test]
    fn display_labels() {
        assert_eq!(Chord::parse("Ctrl+K").unwrap().to_string(), "Ctrl+K");
        assert_eq!(Chord::key("Escape").to_string(), "Esc");
        assert_eq!(Chord::key("?").to_string(), "?");
        assert_eq!(Chord::parse("Shift+arrowup").unwrap().to_string(), "Shift+Arrowup");
    }
}
