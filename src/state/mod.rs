pub mod instance;

pub use instance::{InstanceState, Rendered};
