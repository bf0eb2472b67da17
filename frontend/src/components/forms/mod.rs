pub mod category_form;
pub mod content_section_form;
pub mod event_form;
pub mod page_form;
pub mod registrant_form;
