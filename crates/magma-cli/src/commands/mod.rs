pub mod catalog;
pub mod dispatch;
pub mod fingerprint;
pub mod org;
pub mod project;
pub mod scaffold;
pub mod seed;
pub mod shared;
pub mod tree;
