pub mod loom;
pub mod payment;
pub mod saree_entry;
pub mod user;
pub mod warp;
pub mod warp_color;
pub mod weaver;
pub mod weft;
pub mod weft_color;
