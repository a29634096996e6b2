//! StayHub DSS - Decision support engine for rental listings
//!
//! Turns qualitative preference signals into criterion weights through an
//! influence diagram, then ranks candidate listings with TOPSIS and explains
//! each position.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
