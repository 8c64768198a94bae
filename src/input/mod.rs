use crate::input::key::Key;

pub mod events;
pub mod key;

pub enum InputEvent {
    /// A key was pressed.
    Input(Key),
    /// Redraw, something may have changed in the background
    Render,
    /// Exit application
    Quit,
}
