//! Domain classification and hole seeding.

pub mod classify;
pub mod seed;

pub use classify::{Domain, classify_faces, representative_point};
pub use seed::{Seed, SeedPlacement, hole_seeds, synthesize_seed};
