pub mod disk;
pub mod report;

pub use disk::DiskStorage;
pub use report::ScrapeReport;
