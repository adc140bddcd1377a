//! Order lifecycle and item-association engine.
//!
//! [`Lifecycle`] owns the store it was built with and exposes one method per
//! operation. Each method opens exactly one store transaction, validates every
//! referenced id before mutating anything, and returns fully hydrated values.

mod catalog;
mod comments;
mod error;
mod orders;
mod work_items;

pub use error::LifecycleError;

use crate::store::Store;

pub struct Lifecycle<S>{
    store: S
}

impl<S: Store> Lifecycle<S> {
    pub fn new(store: S) -> Self {
        Lifecycle{ store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
