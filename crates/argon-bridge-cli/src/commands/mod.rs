pub mod batch;
pub mod call;
pub mod config;
pub mod hash;
pub mod inspect;
pub mod misc;
pub mod salt;
pub mod verify;
