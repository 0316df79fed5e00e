//! Spacewars: a small arcade shooter.
//!
//! - `sources`: independently clocked producers (stars, hero input, enemies)
//! - `compositor`: frame gating and the per-frame [`Round`](compositor::Round)
//! - `compute`: the pure turn resolver
//! - `scene`: what a renderer has to provide
//! - `game`: sessions, the orchestrator, and cold restarts

pub mod compositor;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod random;
pub mod scene;
pub mod sources;
pub mod timer;
