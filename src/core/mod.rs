pub mod caption;
pub mod export;
pub mod frames;
pub mod scene;
