pub mod child_rows;
pub mod forms;
pub mod header;
pub mod image_upload;
pub mod language_tabs;
pub mod toast;
pub mod translation_panel;
