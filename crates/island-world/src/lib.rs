//! World store, parcel claims, and island generation.
//!
//! # Modules
//!
//! - [`store`] -- The [`World`] aggregate: every creature, tile, landmark,
//!   garden, and chat message, with lookup and mutation primitives
//! - [`spatial`] -- Claim availability, parcel tile construction, and the
//!   fence-crossing test used by creature movement
//! - [`starting_world`] -- Island terrain and starting creature generation
//! - [`error`] -- Error types ([`WorldError`])

pub mod error;
pub mod spatial;
pub mod starting_world;
pub mod store;

pub use error::WorldError;
pub use spatial::{
    BoundingBox, ClaimRect, build_parcel_tiles, is_area_available, is_point_inside_bounds,
    movement_crosses_any_fence,
};
pub use starting_world::{
    CREATURE_PALETTE, IslandParams, create_starting_world, random_creature_color,
    random_point_on_island,
};
pub use store::World;
