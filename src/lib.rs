pub mod betting_odds;
pub mod differentials;
pub mod dimensions;
pub mod fighter_stats;
pub mod fights;
pub mod keymap;
pub mod normalize;
pub mod pipeline;
pub mod rankings;
pub mod source;
pub mod store;
