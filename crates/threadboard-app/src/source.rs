// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::ThreadRecord;
use crate::demo::demo_threads;

/// Supplies the thread collection shown by the dashboard.
pub trait ThreadSource {
    /// Short human-readable origin, shown in logs and the status line.
    fn name(&self) -> String;
    fn fetch_threads(&self) -> Result<Vec<ThreadRecord>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DemoSource;

impl ThreadSource for DemoSource {
    fn name(&self) -> String {
        "demo".to_owned()
    }

    fn fetch_threads(&self) -> Result<Vec<ThreadRecord>> {
        Ok(demo_threads())
    }
}

impl<S: ThreadSource + ?Sized> ThreadSource for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }

    fn fetch_threads(&self) -> Result<Vec<ThreadRecord>> {
        (**self).fetch_threads()
    }
}

#[cfg(test)]
mod tests {
    use super::{DemoSource, ThreadSource};
    use anyhow::Result;

    #[test]
    fn demo_source_returns_same_collection_each_fetch() -> Result<()> {
        let source: Box<dyn ThreadSource> = Box::new(DemoSource);
        let first = source.fetch_threads()?;
        let second = source.fetch_threads()?;
        assert_eq!(first.len(), 5);
        assert_eq!(first, second);
        assert_eq!(source.name(), "demo");
        Ok(())
    }
}
