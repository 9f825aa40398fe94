pub mod chart;
pub mod effects;
pub mod field;
pub mod gameplay;
pub mod note;
pub mod parsing;
pub mod player;
pub mod spawn;
pub mod timing;
