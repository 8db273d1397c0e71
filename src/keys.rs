/// What a keydown asks the tank to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ClosePopup,
    TogglePause,
    TriggerTransient,
    OpenFocused,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" => Some(KeyAction::ClosePopup),
        "p" | "P" => Some(KeyAction::TogglePause),
        "g" | "G" => Some(KeyAction::TriggerTransient),
        "Enter" | " " => Some(KeyAction::OpenFocused),
        _ => None,
    }
}

/// Whether a key press should count as user engagement.
///
/// Bare modifiers and the pause toggle do not; pausing must not also reset
/// the lifecycle.
#[inline]
pub fn counts_as_interaction(key: &str) -> bool {
    !matches!(
        key,
        "Shift" | "Control" | "Alt" | "Meta" | "CapsLock" | "Tab" | "p" | "P"
    )
}
