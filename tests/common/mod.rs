#![allow(dead_code)]

pub mod memory_fs;
pub mod tracing;
