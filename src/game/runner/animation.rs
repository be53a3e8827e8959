// Animation presentation layer
//
// `AnimationSet` keeps exactly one active pose and owns the switching
// policy (loop mode, clamp, crossfade). The actual clip playback sits behind
// the `AnimationBackend` capability trait so any mixer can drive the mesh.

use super::pose::{LoopMode, Pose, UnknownPose};
use crate::core::Aabb;
use crate::engine::assets::{AssetBundle, AssetError, ClipAsset};

/// A play-once clip reached its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipFinished {
    pub pose: Pose,
}

/// What the presentation layer needs from a clip mixer
pub trait AnimationBackend {
    /// Rewind a clip to its start and clear any fade in progress
    fn reset(&mut self, pose: Pose);
    fn set_loop_mode(&mut self, pose: Pose, mode: LoopMode);
    /// Hold the last frame after a play-once clip ends instead of releasing it
    fn set_clamp_on_finish(&mut self, pose: Pose, clamp: bool);
    /// Ramp the clip's weight from its current value to zero
    fn fade_out(&mut self, pose: Pose, duration: f32);
    /// Ramp the clip's weight from zero to one
    fn fade_in(&mut self, pose: Pose, duration: f32);
    fn play(&mut self, pose: Pose);
    fn stop_all(&mut self);
    /// Advance every playing clip by `dt` seconds and report each play-once
    /// clip that reached its end during this step
    fn advance(&mut self, dt: f32, finished: &mut Vec<ClipFinished>);
    /// Blend weight the clip currently contributes, zero when stopped
    fn weight(&self, pose: Pose) -> f32;
}

/// One validated clip per pose
#[derive(Debug, Clone)]
pub struct ClipSet {
    /// Indexed by `Pose::index`, always `Pose::COUNT` entries
    clips: Vec<ClipAsset>,
}

impl ClipSet {
    /// Pick the clip for every pose out of a bundle.
    ///
    /// A pose without a clip aborts construction; clips under names no pose
    /// uses are ignored.
    pub fn from_bundle(bundle: &AssetBundle) -> Result<Self, AssetError> {
        for name in bundle.clip_names() {
            if Pose::from_name(name).is_err() {
                log::warn!("Ignoring animation clip `{}`: no pose uses it", name);
            }
        }

        let mut clips = Vec::with_capacity(Pose::COUNT);
        for pose in Pose::ALL {
            let clip = bundle
                .clip(pose.name())
                .ok_or_else(|| AssetError::MissingClip {
                    pose: pose.name().to_string(),
                })?;
            clip.validate()?;
            clips.push(clip.clone());
        }
        Ok(Self { clips })
    }

    pub fn get(&self, pose: Pose) -> &ClipAsset {
        &self.clips[pose.index()]
    }

    pub fn duration(&self, pose: Pose) -> f32 {
        self.get(pose).duration
    }
}

/// The set of named poses and the one currently driving the mesh
#[derive(Debug)]
pub struct AnimationSet<B: AnimationBackend> {
    clips: ClipSet,
    backend: B,
    active: Pose,
    fade_duration: f32,
    /// Completion events of the last `advance`, reused between frames
    finished: Vec<ClipFinished>,
}

impl<B: AnimationBackend> AnimationSet<B> {
    /// Wrap a backend and start the run loop at full weight
    pub fn new(clips: ClipSet, backend: B, fade_duration: f32) -> Self {
        let mut set = Self {
            clips,
            backend,
            active: Pose::Run,
            fade_duration: fade_duration.max(0.0),
            finished: Vec::new(),
        };
        set.hard_cut(Pose::Run);
        set
    }

    pub fn active_pose(&self) -> Pose {
        self.active
    }

    pub fn clips(&self) -> &ClipSet {
        &self.clips
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Direct access to the mixer, e.g. for playback speed tweaks
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn fade_duration(&self) -> f32 {
        self.fade_duration
    }

    fn configure(&mut self, pose: Pose) {
        self.backend.reset(pose);
        self.backend.set_loop_mode(pose, pose.loop_mode());
        let clamp = pose.clamps_on_finish();
        self.backend.set_clamp_on_finish(pose, clamp);
    }

    /// Crossfade to `pose`. Returns `false` when it is already active, in
    /// which case playback is left untouched.
    pub fn request_pose(&mut self, pose: Pose) -> bool {
        if pose == self.active {
            return false;
        }
        log::debug!("Pose {} -> {}", self.active, pose);

        self.configure(pose);
        self.backend.fade_out(self.active, self.fade_duration);
        self.backend.fade_in(pose, self.fade_duration);
        self.backend.play(pose);
        self.active = pose;
        true
    }

    /// Request a pose by its symbolic name
    pub fn request_pose_named(&mut self, name: &str) -> Result<bool, UnknownPose> {
        let pose = Pose::from_name(name)?;
        Ok(self.request_pose(pose))
    }

    /// Stop everything and show `pose` at full weight with no fade
    pub fn hard_cut(&mut self, pose: Pose) {
        self.backend.stop_all();
        self.configure(pose);
        self.backend.play(pose);
        self.active = pose;
    }

    /// Advance playback; completion events are passed up unfiltered
    pub fn advance(&mut self, dt: f32) -> &[ClipFinished] {
        self.finished.clear();
        self.backend.advance(dt.max(0.0), &mut self.finished);
        &self.finished
    }

    /// Model-space envelope of every clip currently blended in.
    ///
    /// Clips without an extent of their own use `fallback`.
    pub fn rendered_extent(&self, fallback: Aabb) -> Aabb {
        Pose::ALL
            .into_iter()
            .filter(|pose| self.backend.weight(*pose) > 0.0)
            .map(|pose| self.clips.get(pose).extent.unwrap_or(fallback))
            .reduce(|a, b| a.union(&b))
            .unwrap_or(fallback)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::Vec3;

    /// Capability calls as seen by a backend
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Reset(Pose),
        SetLoopMode(Pose, LoopMode),
        SetClamp(Pose, bool),
        FadeOut(Pose, f32),
        FadeIn(Pose, f32),
        Play(Pose),
        StopAll,
    }

    /// Backend double that records every call and plays nothing
    #[derive(Debug, Default)]
    pub(crate) struct RecordingBackend {
        pub calls: Vec<Call>,
        pub pending: Vec<ClipFinished>,
        pub playing: Vec<Pose>,
    }

    impl AnimationBackend for RecordingBackend {
        fn reset(&mut self, pose: Pose) {
            self.calls.push(Call::Reset(pose));
        }
        fn set_loop_mode(&mut self, pose: Pose, mode: LoopMode) {
            self.calls.push(Call::SetLoopMode(pose, mode));
        }
        fn set_clamp_on_finish(&mut self, pose: Pose, clamp: bool) {
            self.calls.push(Call::SetClamp(pose, clamp));
        }
        fn fade_out(&mut self, pose: Pose, duration: f32) {
            self.calls.push(Call::FadeOut(pose, duration));
            self.playing.retain(|p| *p != pose);
        }
        fn fade_in(&mut self, pose: Pose, duration: f32) {
            self.calls.push(Call::FadeIn(pose, duration));
        }
        fn play(&mut self, pose: Pose) {
            self.calls.push(Call::Play(pose));
            self.playing.push(pose);
        }
        fn stop_all(&mut self) {
            self.calls.push(Call::StopAll);
            self.playing.clear();
        }
        fn advance(&mut self, _dt: f32, finished: &mut Vec<ClipFinished>) {
            finished.append(&mut self.pending);
        }
        fn weight(&self, pose: Pose) -> f32 {
            if self.playing.contains(&pose) {
                1.0
            } else {
                0.0
            }
        }
    }

    pub(crate) fn full_bundle() -> AssetBundle {
        let mut bundle = AssetBundle::new();
        for pose in Pose::ALL {
            bundle.insert_clip(pose.name(), ClipAsset::new(pose.name(), 0.5));
        }
        bundle
    }

    fn recording_set() -> AnimationSet<RecordingBackend> {
        let clips = ClipSet::from_bundle(&full_bundle()).unwrap();
        let mut set = AnimationSet::new(clips, RecordingBackend::default(), 0.1);
        set.backend.calls.clear();
        set
    }

    #[test]
    fn test_clip_set_requires_every_pose() {
        let bundle = AssetBundle::new().with_clip("run", ClipAsset::new("run", 1.0));
        let err = ClipSet::from_bundle(&bundle).unwrap_err();
        assert!(matches!(err, AssetError::MissingClip { pose } if pose == "jump"));
    }

    #[test]
    fn test_clip_set_rejects_bad_duration() {
        let bundle = full_bundle().with_clip("roll", ClipAsset::new("roll", -0.5));
        assert!(matches!(
            ClipSet::from_bundle(&bundle),
            Err(AssetError::InvalidClip { .. })
        ));
    }

    #[test]
    fn test_clip_set_ignores_extra_clips() {
        let bundle = full_bundle().with_clip("dance", ClipAsset::new("dance", 2.0));
        let clips = ClipSet::from_bundle(&bundle).unwrap();
        assert_eq!(clips.duration(Pose::Die), 0.5);
    }

    #[test]
    fn test_new_starts_run_with_hard_cut() {
        let clips = ClipSet::from_bundle(&full_bundle()).unwrap();
        let set = AnimationSet::new(clips, RecordingBackend::default(), 0.1);
        assert_eq!(set.active_pose(), Pose::Run);
        assert_eq!(
            set.backend().calls,
            vec![
                Call::StopAll,
                Call::Reset(Pose::Run),
                Call::SetLoopMode(Pose::Run, LoopMode::Repeat),
                Call::SetClamp(Pose::Run, false),
                Call::Play(Pose::Run),
            ]
        );
    }

    #[test]
    fn test_request_pose_crossfades() {
        let mut set = recording_set();
        assert!(set.request_pose(Pose::Jump));
        assert_eq!(set.active_pose(), Pose::Jump);
        assert_eq!(
            set.backend().calls,
            vec![
                Call::Reset(Pose::Jump),
                Call::SetLoopMode(Pose::Jump, LoopMode::Once),
                Call::SetClamp(Pose::Jump, false),
                Call::FadeOut(Pose::Run, 0.1),
                Call::FadeIn(Pose::Jump, 0.1),
                Call::Play(Pose::Jump),
            ]
        );
    }

    #[test]
    fn test_die_pose_clamps() {
        let mut set = recording_set();
        set.request_pose(Pose::Die);
        let calls = &set.backend().calls;
        let clamp = Call::SetClamp(Pose::Die, true);
        let once = Call::SetLoopMode(Pose::Die, LoopMode::Once);
        assert!(calls.contains(&clamp));
        assert!(calls.contains(&once));
    }

    #[test]
    fn test_request_active_pose_is_noop() {
        let mut set = recording_set();
        assert!(!set.request_pose(Pose::Run));
        assert!(set.backend().calls.is_empty());

        set.request_pose(Pose::Roll);
        set.backend.calls.clear();
        assert!(!set.request_pose(Pose::Roll));
        assert!(set.backend().calls.is_empty());
    }

    #[test]
    fn test_request_pose_named() {
        let mut set = recording_set();
        assert_eq!(set.request_pose_named("strafe_left"), Ok(true));
        assert_eq!(set.active_pose(), Pose::StrafeLeft);
        assert_eq!(
            set.request_pose_named("moonwalk"),
            Err(UnknownPose("moonwalk".to_string()))
        );
        assert_eq!(set.active_pose(), Pose::StrafeLeft);
    }

    #[test]
    fn test_advance_forwards_every_event() {
        let mut set = recording_set();
        set.backend.pending = vec![
            ClipFinished { pose: Pose::Die },
            ClipFinished {
                pose: Pose::StrafeLeft,
            },
        ];
        let events = set.advance(0.016);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].pose, Pose::Die);
        let capacity = set.finished.capacity();

        // The event buffer is cleared, not reallocated, between frames
        assert!(set.advance(0.016).is_empty());
        assert_eq!(set.finished.capacity(), capacity);
    }

    #[test]
    fn test_rendered_extent_unions_blended_clips() {
        let low = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let bind = Aabb::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 2.0, 0.5));
        let bundle = full_bundle().with_clip("roll", ClipAsset::new("roll", 0.5).with_extent(low));
        let clips = ClipSet::from_bundle(&bundle).unwrap();
        let mut set = AnimationSet::new(clips, RecordingBackend::default(), 0.1);

        assert_eq!(set.rendered_extent(bind), bind);

        // The recording backend drops the old clip's weight immediately
        set.request_pose(Pose::Roll);
        assert_eq!(set.rendered_extent(bind), low);

        set.backend.playing.push(Pose::Run);
        let both = set.rendered_extent(bind);
        assert_eq!(both.min, Vec3::new(-1.0, 0.0, -1.0));
        assert_eq!(both.max, Vec3::new(1.0, 2.0, 1.0));
    }

    #[test]
    fn test_rendered_extent_with_nothing_playing() {
        let clips = ClipSet::from_bundle(&full_bundle()).unwrap();
        let mut set = AnimationSet::new(clips, RecordingBackend::default(), 0.1);
        set.backend.playing.clear();
        let bind = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert_eq!(set.rendered_extent(bind), bind);
    }
}
