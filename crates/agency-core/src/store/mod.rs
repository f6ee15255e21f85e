// ── Local collection storage ──

pub(crate) mod collection;

pub use collection::ItemCollection;
