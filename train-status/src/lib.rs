//! Live train status board.
//!
//! A small web application that answers: "Where is my train right now,
//! and when will it reach my station?"

pub mod cache;
pub mod config;
pub mod domain;
pub mod estimator;
pub mod feed;
pub mod stations;
pub mod web;
