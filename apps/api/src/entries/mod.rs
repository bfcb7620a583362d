pub mod handlers;
pub mod stats;
pub mod store;
pub mod view;
