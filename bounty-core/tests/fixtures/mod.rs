pub mod factories;

#[allow(unused_imports)]
pub use factories::*;
