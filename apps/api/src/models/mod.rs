pub mod catalog;
pub mod output;
pub mod profile;
pub mod reference;
