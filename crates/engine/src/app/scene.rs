use thiserror::Error;

use super::input::InputSnapshot;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Restart,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("invalid scene configuration: {0}")]
    Config(String),
}

pub trait Scene {
    /// Builds the session's world state. Configuration problems (bad content,
    /// inconsistent geometry) fail here rather than producing a partial world.
    fn load(&mut self) -> Result<(), SceneError>;
    fn update(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand;
    fn unload(&mut self);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

/// Owns the single active scene and enforces the load/unload pairing.
/// `restart` is a hard reset: the previous session is torn down before the
/// next one is built, and `shutdown` is idempotent.
pub struct SceneHost {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl SceneHost {
    pub fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    pub fn load_active(&mut self) -> Result<(), SceneError> {
        if self.is_loaded {
            return Ok(());
        }
        self.scene.load()?;
        self.is_loaded = true;
        Ok(())
    }

    pub fn update_active(&mut self, fixed_dt_seconds: f32, input: &InputSnapshot) -> SceneCommand {
        if !self.is_loaded {
            return SceneCommand::None;
        }
        self.scene.update(fixed_dt_seconds, input)
    }

    pub fn restart(&mut self) -> Result<(), SceneError> {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
        self.scene.load()?;
        self.is_loaded = true;
        Ok(())
    }

    pub fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
    }

    pub fn debug_title_active(&self) -> Option<String> {
        if !self.is_loaded {
            return None;
        }
        self.scene.debug_title()
    }
}
