#![allow(clippy::unwrap_used, clippy::expect_used)]

mod host_tests;

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::HostObject;

/// A host object that counts how often it was disposed.
#[derive(Debug, Default)]
pub(crate) struct Counter {
    pub(crate) value: parking_lot::Mutex<i32>,
    pub(crate) disposed: Arc<AtomicUsize>,
}

impl HostObject for Counter {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dispose(&self) {
        self.disposed.fetch_add(1, Ordering::SeqCst);
    }
}
