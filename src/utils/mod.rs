pub(crate) mod progress;

pub use progress::ProgressBuilder;
