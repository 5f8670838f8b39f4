pub mod edit_standard_modal;
pub mod standards_page;
pub mod standards_table;
