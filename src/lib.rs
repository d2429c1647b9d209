// TIA debugger modules
pub mod prelude;
pub mod tia;

// Re-exports
pub use tia::debug::{DebuggerSystem, TiaDebug};
pub use tia::{Object, TiaChip};
