pub mod aliases;
pub mod common;
pub mod crosswalk;
pub mod players;
