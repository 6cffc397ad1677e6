pub mod driver;

pub use driver::{Handle, Input, run, spawn};
