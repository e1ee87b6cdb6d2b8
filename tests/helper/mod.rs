#![allow(dead_code)]

mod sources;

pub use sources::*;
