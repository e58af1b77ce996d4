pub mod events;
pub mod token;
