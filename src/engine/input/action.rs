// Runner action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Discrete gameplay actions a key press can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    StrafeLeft,
    StrafeRight,
    Roll,
}

impl Action {
    pub const ALL: [Action; 4] = [
        Action::Jump,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Roll,
    ];
}

/// Default bindings: WASD plus arrow keys, Space also jumps
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::KeyW, Action::Jump),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::Space, Action::Jump),
        (KeyCode::KeyA, Action::StrafeLeft),
        (KeyCode::ArrowLeft, Action::StrafeLeft),
        (KeyCode::KeyD, Action::StrafeRight),
        (KeyCode::ArrowRight, Action::StrafeRight),
        (KeyCode::KeyS, Action::Roll),
        (KeyCode::ArrowDown, Action::Roll),
    ]
}
