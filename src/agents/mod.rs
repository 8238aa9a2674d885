//! Wandering agents
//!
//! Bounded random-walk motion for the animated cows. Each agent owns its
//! kinematic state and takes the random source as a parameter, so a seeded
//! generator replays the same walk.

mod wander;

pub use wander::{Agent, Bounds, WanderParams};
