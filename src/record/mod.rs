//! Business records and the merge that combines partial extractions.
//!
//! Each crawled page yields at most one [`ExtractedRecord`]. Several pages
//! usually describe the same business, so [`RecordMerger`] folds them into a
//! single [`CombinedRecord`] per entity name.

mod merge;
mod model;

pub use merge::{CombinedMap, RecordMerger};
pub use model::{
    Address, CombinedRecord, CompanyInfo, Contact, ExtractedRecord, Location, OpeningHours,
    Social, UNKNOWN_BUSINESS,
};
