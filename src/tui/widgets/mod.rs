pub mod header;
pub mod schedule;
pub mod statusbar;
