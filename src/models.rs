pub mod authors;
pub mod quotes;
