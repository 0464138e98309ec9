pub mod analyse;
pub mod duplicates;
pub mod queries;
pub mod slow;
