//! modebench Demos
//!
//! Runnable demonstrations of every measurement mode. This crate is not
//! published; it exists solely to host examples that depend on `modebench`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p modebench-demos --release
//! ```
//!
//! | Example | Feature |
//! |---------|---------|
//! | `benchmark_modes` | One 100ms sleep measured as throughput, average time, sample time, single shot, several modes at once, and `All` |
