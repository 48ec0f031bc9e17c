#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod reply;
pub mod thread;

pub use crate::reply::{ReplyPolicy, can_reply};
pub use crate::thread::{Thread, Threaded, reconstruct};
