// ── Reactive item storage ──

mod collection;

pub use collection::ItemStore;
