/// What a key press asks the background to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyIntent {
    /// Leave the active effect and bring the panel back.
    Exit,
}

#[inline]
pub fn intent_for_key(key: &str) -> Option<KeyIntent> {
    match key {
        // "Esc" is what older Edge reports
        "Escape" | "Esc" => Some(KeyIntent::Exit),
        _ => None,
    }
}
