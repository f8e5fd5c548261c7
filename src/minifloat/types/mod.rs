mod complex_minifloat;
mod format;
mod minifloat;

pub use complex_minifloat::ComplexMinifloat;
pub use format::{E2M1, E4M3, Layout, Precision};
pub use minifloat::Minifloat;
