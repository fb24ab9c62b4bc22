use stabrs_core::models::Position;

pub use stabrs_core::models::Interval;

pub trait Stabber: Send + Sync {
    fn build(intervals: Vec<Interval>) -> Self
    where
        Self: Sized;

    /// Number of intervals that contain `point`, both ends inclusive.
    fn stab_query(&self, point: Position) -> u32;

    /// Number of intervals that take part in queries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
