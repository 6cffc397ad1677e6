pub mod headless;

pub use headless::{HeadlessElement, HeadlessRenderer};
