pub mod book_search;
pub mod suggestion_rows;
