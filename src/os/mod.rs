// src/os/mod.rs

//! OS-facing plumbing: spawning and talking to the interpreter child.

pub mod child;

pub use child::{ChildProcess, PipeChild};
