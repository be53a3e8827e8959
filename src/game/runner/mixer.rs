// Software clip mixer: per-clip playback cursor, loop policy and weight fades

use super::animation::{AnimationBackend, ClipFinished, ClipSet};
use super::pose::{LoopMode, Pose};
use crate::core::math::lerp;

/// Linear weight ramp
#[derive(Debug, Clone, Copy)]
struct WeightFade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl WeightFade {
    fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        }
    }
}

/// Playback state of one clip
#[derive(Debug, Clone)]
struct ClipTrack {
    duration: f32,
    time: f32,
    weight: f32,
    fade: Option<WeightFade>,
    loop_mode: LoopMode,
    clamp_on_finish: bool,
    /// Contributing to the mesh and advancing
    enabled: bool,
    /// Parked on the last frame after a clamped finish
    held: bool,
    /// Completion already reported for this play-through
    finished: bool,
}

impl ClipTrack {
    fn new(duration: f32) -> Self {
        Self {
            duration,
            time: 0.0,
            weight: 1.0,
            fade: None,
            loop_mode: LoopMode::Repeat,
            clamp_on_finish: false,
            enabled: false,
            held: false,
            finished: false,
        }
    }

    fn rewind(&mut self) {
        self.time = 0.0;
        self.fade = None;
        self.held = false;
        self.finished = false;
    }

    fn step_fade(&mut self, dt: f32) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.elapsed += dt;
        let t = fade.progress();
        self.weight = lerp(fade.from, fade.to, t);

        if t >= 1.0 {
            let faded_out = fade.to <= 0.0;
            self.fade = None;
            if faded_out {
                self.enabled = false;
            }
        }
    }

    /// Returns `true` when a play-once clip reaches its end on this step
    fn step_time(&mut self, dt: f32) -> bool {
        if self.held {
            return false;
        }
        self.time += dt;

        match self.loop_mode {
            LoopMode::Repeat => {
                self.time = if self.duration > 0.0 {
                    self.time.rem_euclid(self.duration)
                } else {
                    0.0
                };
                false
            }
            LoopMode::Once => {
                if self.finished || self.time < self.duration {
                    return false;
                }
                self.finished = true;
                self.time = self.duration;
                if self.clamp_on_finish {
                    self.held = true;
                } else {
                    // Released back to the bind pose
                    self.enabled = false;
                    self.weight = 0.0;
                }
                true
            }
        }
    }
}

/// Built-in [`AnimationBackend`] tracking cursor and weight for every pose
#[derive(Debug, Clone)]
pub struct ClipMixer {
    /// Indexed by `Pose::index`
    tracks: Vec<ClipTrack>,
}

impl ClipMixer {
    pub fn new(clips: &ClipSet) -> Self {
        Self {
            tracks: Pose::ALL
                .into_iter()
                .map(|pose| ClipTrack::new(clips.duration(pose)))
                .collect(),
        }
    }

    fn track(&self, pose: Pose) -> &ClipTrack {
        &self.tracks[pose.index()]
    }

    fn track_mut(&mut self, pose: Pose) -> &mut ClipTrack {
        &mut self.tracks[pose.index()]
    }

    /// Playback cursor in seconds
    pub fn time(&self, pose: Pose) -> f32 {
        self.track(pose).time
    }

    pub fn is_enabled(&self, pose: Pose) -> bool {
        self.track(pose).enabled
    }

    pub fn is_fading(&self, pose: Pose) -> bool {
        self.track(pose).fade.is_some()
    }

    pub fn is_holding_last_frame(&self, pose: Pose) -> bool {
        self.track(pose).held
    }

    pub fn loop_mode(&self, pose: Pose) -> LoopMode {
        self.track(pose).loop_mode
    }

    pub fn clamps_on_finish(&self, pose: Pose) -> bool {
        self.track(pose).clamp_on_finish
    }
}

impl AnimationBackend for ClipMixer {
    fn reset(&mut self, pose: Pose) {
        let track = self.track_mut(pose);
        track.rewind();
        track.enabled = true;
        track.weight = 1.0;
    }

    fn set_loop_mode(&mut self, pose: Pose, mode: LoopMode) {
        self.track_mut(pose).loop_mode = mode;
    }

    fn set_clamp_on_finish(&mut self, pose: Pose, clamp: bool) {
        self.track_mut(pose).clamp_on_finish = clamp;
    }

    fn fade_out(&mut self, pose: Pose, duration: f32) {
        let track = self.track_mut(pose);
        if !track.enabled {
            return;
        }
        if duration <= 0.0 {
            track.fade = None;
            track.weight = 0.0;
            track.enabled = false;
            return;
        }
        track.fade = Some(WeightFade {
            from: track.weight,
            to: 0.0,
            elapsed: 0.0,
            duration,
        });
    }

    fn fade_in(&mut self, pose: Pose, duration: f32) {
        let track = self.track_mut(pose);
        if duration <= 0.0 {
            track.fade = None;
            track.weight = 1.0;
            return;
        }
        track.weight = 0.0;
        track.fade = Some(WeightFade {
            from: 0.0,
            to: 1.0,
            elapsed: 0.0,
            duration,
        });
    }

    fn play(&mut self, pose: Pose) {
        self.track_mut(pose).enabled = true;
    }

    fn stop_all(&mut self) {
        for track in &mut self.tracks {
            track.rewind();
            track.enabled = false;
            track.weight = 1.0;
        }
    }

    fn advance(&mut self, dt: f32, finished: &mut Vec<ClipFinished>) {
        for (pose, track) in Pose::ALL.into_iter().zip(self.tracks.iter_mut()) {
            if !track.enabled {
                continue;
            }
            track.step_fade(dt);
            if !track.enabled {
                continue;
            }
            if track.step_time(dt) {
                finished.push(ClipFinished { pose });
            }
        }
    }

    fn weight(&self, pose: Pose) -> f32 {
        let track = self.track(pose);
        if track.enabled {
            track.weight
        } else {
            0.0
        }
    }
}
