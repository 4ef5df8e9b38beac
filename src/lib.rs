//! Core logic of the access-control administration console.
//!
//! Every "assign X to Y" screen is an instance of [`transfer::DualList`], paired
//! door/floor ↔ user screens commit through [`assignment::commit_pair`], and the
//! access calendar derives its conflict list from [`schedule::detect_conflicts`].

pub mod assignment;
pub mod catalog;
pub mod config;
pub mod display;
pub mod export;
pub mod ids;
pub mod parser;
pub mod schedule;
pub mod seed;
pub mod transfer;
pub mod web;
