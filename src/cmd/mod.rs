pub mod blend;
pub mod html;
pub mod search;
pub mod stats;
