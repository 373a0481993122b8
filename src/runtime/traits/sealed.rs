// ABOUTME: Marker supertrait that keeps the runtime traits crate-private to implement.
// ABOUTME: Implemented by BollardRuntime and, in tests, FakeRuntime.

pub trait Sealed {}
