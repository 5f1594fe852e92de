pub mod ball;
pub mod collision;
pub mod math;
pub mod shot;
pub mod step;
pub mod table;
pub mod time;
