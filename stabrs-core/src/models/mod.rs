pub mod interval;
pub mod locus;
pub mod read;

// re-export for cleaner imports
pub use self::interval::{Interval, Position};
pub use self::locus::{Coverage, Locus};
pub use self::read::Read;
