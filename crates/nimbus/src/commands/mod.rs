pub mod eips;
pub mod instances;
pub mod interface;
pub mod reserved;
pub mod storage;
