pub mod chart;
pub mod styles;


pub use chart::{ensure_palette_capacity, render};
