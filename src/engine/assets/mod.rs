// Asset bundle types
//
// Loading is done by the host; this module describes what the player
// component receives from the loader and how a bad bundle is reported.

mod bundle;

pub use bundle::{AssetBundle, ClipAsset, SkinnedMesh};

/// Asset integrity errors, fatal when building a player
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("No animation clip for pose `{pose}`")]
    MissingClip { pose: String },

    #[error("Invalid animation clip `{name}`: {reason}")]
    InvalidClip { name: String, reason: String },
}
