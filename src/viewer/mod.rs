pub mod cloud;
pub mod disc_model;

pub use cloud::Cloud;
pub use disc_model::DiscModel;
