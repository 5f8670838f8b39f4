pub mod use_standards;
