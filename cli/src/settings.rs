use anyhow::Context;
use hexcat_core::{GameConfig, SurfaceSize};
use hexcat_runtime::LoopConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Virtual screen the terminal pretends to be, taps are given in its pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ScreenSettings {
    pub width: f32,
    pub height: f32,
}

impl ScreenSettings {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 800.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub game: GameConfig,
    pub render_loop: LoopConfig,
    pub screen: ScreenSettings,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid settings in {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let settings: Self = toml::from_str(text)?;
        Ok(settings.normalized())
    }

    /// Applies the same limits the engine enforces.
    pub fn normalized(mut self) -> Self {
        let game = self.game;
        self.game = GameConfig::new(game.edge_size, game.animation_frames, game.spawn);
        self
    }
}
