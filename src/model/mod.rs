// File: ./src/model/mod.rs
pub mod block;
pub mod header;
pub mod merge;
pub mod parser;

pub use block::{
    Block, BlockCandidate, BlockTemplate, DateCellInfo, DatedBlockCandidate, DayRange, RawRecord,
    TimeRange,
};
