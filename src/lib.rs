//! Career Compass - Adaptive Career Orientation Interview Engine
//!
//! This crate runs a multi-turn interview that infers a career-orientation
//! profile from a bounded sequence of answers, deciding after every answer
//! whether to continue probing, request a clarification, or conclude.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
