pub mod composer;

pub use composer::{Composer, ComposerEvent, LoadedSystem};
