pub mod audio;
pub mod catalog;
pub mod event;
pub mod feed;
pub mod http;
pub mod util;
