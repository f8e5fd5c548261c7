pub mod types;
pub mod arith;
pub mod complex;
pub mod convert;

pub use arith::{add_sub, multiply};
pub use complex::{complex_add_sub, complex_multiply};
pub use convert::{complex_convert, to_narrower, to_wider};
pub use types::{ComplexMinifloat, Minifloat, Precision};
