pub mod location;
pub mod token;
pub mod viewport;
pub mod weather;
