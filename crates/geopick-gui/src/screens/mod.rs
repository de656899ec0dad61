pub mod map_screen;
pub mod token_form;
