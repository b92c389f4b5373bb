// Keyboard filtering for the canvas game

/// Keys the game reads. Their default action (page scroll) is suppressed.
pub fn is_game_key(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "w" | "a" | "s" | "d" | "arrowup" | "arrowdown" | "arrowleft" | "arrowright"
    )
}

/// Returns true when a text input element has focus.
/// Used to suppress game key bindings while the user is typing.
pub fn is_text_input_focused() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.active_element())
        .map(|el| {
            let tag = el.tag_name();
            tag.eq_ignore_ascii_case("INPUT") || tag.eq_ignore_ascii_case("TEXTAREA")
        })
        .unwrap_or(false)
}
