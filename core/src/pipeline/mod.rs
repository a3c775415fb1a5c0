pub mod aggregator;
pub mod classifier;
pub mod cleaner;
pub mod geometry;
pub mod row_pool;
pub mod run;
pub mod segment;
pub mod trimmer;

pub use aggregator::AggregateStage;
pub use cleaner::CleanStage;
pub use geometry::GeometryStage;
pub use row_pool::RowPool;
pub use segment::SegmentStage;
pub use trimmer::TrimStage;
