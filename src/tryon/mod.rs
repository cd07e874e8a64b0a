pub mod alpha_mask;
pub mod background;
pub mod blend;
pub mod body_color;
pub mod classify;
pub mod composite;
pub mod erase;
pub mod palette;
pub mod placement;
pub mod region_mask;
pub mod soften;
