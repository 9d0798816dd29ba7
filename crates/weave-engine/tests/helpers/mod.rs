//! Shared fixtures for the integration suite

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use weave_engine::ProviderSpec;

/// Minimal service trait resolved through the engine
pub trait Greeter: Send + Sync + std::fmt::Debug {
    fn greet(&self) -> String;
}

/// Greeter returning a fixed text
#[derive(Debug)]
pub struct FixedGreeter(pub &'static str);

impl Greeter for FixedGreeter {
    fn greet(&self) -> String {
        self.0.to_string()
    }
}

/// Spec for a greeter that always produces `text`
pub fn greeter_spec(name: &'static str, text: &'static str) -> ProviderSpec {
    ProviderSpec::of::<dyn Greeter, _>(name, move |_| Ok(Arc::new(FixedGreeter(text))))
}

/// Service that counts how many times its constructor ran
#[derive(Debug)]
pub struct Counted;

/// Spec for a [`Counted`] service incrementing `calls` on each construction
pub fn counted_spec(name: &'static str, calls: Arc<AtomicUsize>) -> ProviderSpec {
    ProviderSpec::of::<Counted, _>(name, move |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(Counted))
    })
}
