pub mod review;
pub mod selection;
