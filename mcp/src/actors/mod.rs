//! Actor operations: create, modify, delete, and report on level actors
//!
//! Each operation resolves its parameters up front, takes one [`Session`] from the connection
//! manager, and issues its remote calls strictly in sequence. Follow-up steps after a spawn
//! or lookup are fault tolerant and summarized in the result message.
//!
//! [`Session`]: crate::unreal::Session

mod info;
mod kind;
mod material;
mod modify;
mod spawn;
mod steps;

pub use info::{LevelInfo, get_actor_info, get_level_info};
pub use material::MaterialChoice;
pub use modify::{ActorChanges, delete_actor, modify_actor};
pub use spawn::{
    MeshActorSpec, PrimitiveShape, create_static_mesh_actor, spawn_actor_from_blueprint,
    spawn_mesh_actor, spawn_static_mesh,
};
