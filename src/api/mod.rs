pub mod payments;
pub mod static_files;
