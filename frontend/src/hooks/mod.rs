pub mod use_otp;
pub mod use_reference_data;
pub mod use_relative_lookup;
pub mod use_session;
pub mod use_translation;
