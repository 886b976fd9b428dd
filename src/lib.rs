//! Interview Analyst - editable interview analysis over a remote analysis API.
//!
//! Reports arrive as unordered heading → content maps. This crate turns them
//! into ordered, id-keyed analyses that can be edited, reordered, snapshotted
//! and exported.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
