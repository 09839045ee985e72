mod audit;
pub use audit::*;

mod profile;
pub use profile::*;

mod progress;
pub use progress::*;

mod ratio;
pub use ratio::*;

mod skills;
pub use skills::*;
