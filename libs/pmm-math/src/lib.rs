#![no_std]

pub mod decimal_math;
pub mod full_math;

pub use decimal_math::*;
pub use full_math::*;
