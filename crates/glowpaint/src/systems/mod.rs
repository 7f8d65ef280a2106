pub mod effects;
pub mod pens;
pub mod symmetry;
