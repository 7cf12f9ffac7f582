//! Authored data model (serde)
//!
//! JSON structures produced by the animation/character authoring pipeline.
//! The engine never reads files itself; callers deserialize these records and
//! hand them to the load-time resolvers in [`crate::engine`]. Image
//! references stay opaque strings.

pub mod animation;
pub mod character;

pub use animation::{
    AnimationData, BoxData, EffectData, FrameData, GroundHitAnim, GuardFlag, MoveData, Strength,
};
pub use character::{AttackData, CancelRuleData, CharacterData, CharacterFileData};
