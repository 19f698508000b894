pub mod chart;
pub mod indicators;
