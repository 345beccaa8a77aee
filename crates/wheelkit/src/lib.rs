pub mod anim;
pub mod colors;
pub mod control;
pub mod layout;
pub mod options;
pub mod sequence;
pub mod spin;
pub mod store;

pub use layout::{Slice, layout};
pub use options::{OptionError, OptionList};
pub use spin::{SpinError, SpinOutcome, SpinResolver};
pub use store::{JsonFileStore, OptionStore, StoreError};
