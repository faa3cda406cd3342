// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dashboard;
pub mod demo;
pub mod filter;
pub mod ids;
pub mod model;
pub mod source;
pub mod state;
pub mod stats;

pub use dashboard::*;
pub use demo::*;
pub use filter::*;
pub use ids::*;
pub use model::*;
pub use source::*;
pub use state::*;
pub use stats::*;
