pub mod kernel;
pub mod messages;
pub mod player;
pub mod tile;
pub mod track;
