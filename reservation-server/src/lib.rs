//! Train seat reservation server.
//!
//! Answers "which seats on which trains are free between these two
//! stations, and what do they cost?", and books them without ever
//! double-selling a seat for overlapping parts of a journey.

pub mod availability;
pub mod cache;
pub mod config;
pub mod domain;
pub mod fares;
pub mod route;
pub mod service;
pub mod stations;
pub mod storage;
pub mod web;
