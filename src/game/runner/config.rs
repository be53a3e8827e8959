// Runner tuning constants, passed into the player at construction

/// Configuration errors reported by [`RunnerConfig::validate`]
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("gravity must pull downward (negative), got {0}")]
    GravityNotDownward(f32),
}

/// Immutable gameplay constants for one runner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerConfig {
    // Lanes
    /// Lateral distance between neighbouring lane centres (world units)
    pub lane_width: f32,
    /// Smoothing rate of the lateral filter (1/s)
    pub lateral_smoothing: f32,

    // Jump & roll
    /// Initial upward velocity of a jump (units/s)
    pub jump_strength: f32,
    /// Vertical acceleration while airborne (units/s², negative)
    pub gravity: f32,
    /// Height of the ground plane
    pub ground_level: f32,
    /// How long a roll lasts (seconds)
    pub roll_duration: f32,

    // Presentation
    /// Fade window used when switching poses (seconds)
    pub crossfade_duration: f32,
    /// Padding added around the rendered geometry for collision
    pub bounds_margin: f32,
    /// Uniform scale applied to the skinned mesh
    pub model_scale: f32,
    /// Capsule radius used when no mesh is available
    pub placeholder_radius: f32,
    /// Capsule height used when no mesh is available
    pub placeholder_height: f32,
}

/// Stock tuning for a three-lane track
pub const BASE_CONFIG: RunnerConfig = RunnerConfig {
    lane_width: 2.5,
    lateral_smoothing: 10.0,

    jump_strength: 12.0,
    gravity: -35.0,
    ground_level: 0.0,
    roll_duration: 0.8,

    crossfade_duration: 0.1,
    bounds_margin: 0.1,
    model_scale: 0.015,
    placeholder_radius: 0.5,
    placeholder_height: 2.5,
};

impl Default for RunnerConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl RunnerConfig {
    pub fn with_lane_width(mut self, lane_width: f32) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_jump(mut self, jump_strength: f32, gravity: f32) -> Self {
        self.jump_strength = jump_strength;
        self.gravity = gravity;
        self
    }

    pub fn with_roll_duration(mut self, roll_duration: f32) -> Self {
        self.roll_duration = roll_duration;
        self
    }

    pub fn with_crossfade_duration(mut self, crossfade_duration: f32) -> Self {
        self.crossfade_duration = crossfade_duration;
        self
    }

    pub fn with_lateral_smoothing(mut self, lateral_smoothing: f32) -> Self {
        self.lateral_smoothing = lateral_smoothing;
        self
    }

    /// Check every field; a jump must always come back down
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("lane_width", self.lane_width),
            ("lateral_smoothing", self.lateral_smoothing),
            ("jump_strength", self.jump_strength),
            ("gravity", self.gravity),
            ("ground_level", self.ground_level),
            ("roll_duration", self.roll_duration),
            ("crossfade_duration", self.crossfade_duration),
            ("bounds_margin", self.bounds_margin),
            ("model_scale", self.model_scale),
            ("placeholder_radius", self.placeholder_radius),
            ("placeholder_height", self.placeholder_height),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field, value });
        }

        let positive = [
            ("lane_width", self.lane_width),
            ("lateral_smoothing", self.lateral_smoothing),
            ("jump_strength", self.jump_strength),
            ("roll_duration", self.roll_duration),
            ("model_scale", self.model_scale),
            ("placeholder_height", self.placeholder_height),
        ];
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NotPositive { field, value });
        }

        let non_negative = [
            ("crossfade_duration", self.crossfade_duration),
            ("bounds_margin", self.bounds_margin),
            ("placeholder_radius", self.placeholder_radius),
        ];
        if let Some(&(field, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(ConfigError::Negative { field, value });
        }

        if self.gravity >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        Ok(())
    }
}
