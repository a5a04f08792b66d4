pub mod contents;
pub mod main_contents;
