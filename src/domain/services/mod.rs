mod fallback;

pub use fallback::{ErrorFormatter, Fallback};
