//! Fix-and-flip deal analysis: a static repair catalog, the max-allowable-offer
//! calculation and the egui front end that drives it.

pub mod catalog;
pub mod config;
pub mod deal;
pub mod model;
pub mod ui;
