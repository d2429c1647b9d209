//! Convenient imports for consumers of tia-debug
//!
//! Pull in everything commonly needed in one line:
//! ```rust
//! use tia_debug::prelude::*;
//! ```

// Debugger API
pub use crate::tia::debug::accessors::TiaRegisters;
pub use crate::tia::debug::config::{DebugConfig, TvStandard};
pub use crate::tia::debug::delay_queue::DelayQueueIterator;
pub use crate::tia::debug::error::TiaDebugError;
pub use crate::tia::debug::fields::Field;
pub use crate::tia::debug::state::{Stamp, TiaState};
pub use crate::tia::debug::{DebuggerSystem, TiaDebug};

// Chip-facing types
pub use crate::tia::collisions::{CollisionPair, Collisions};
pub use crate::tia::registers::{ColorRegister, ReadRegister, WriteRegister};
pub use crate::tia::{Object, PendingWrite, TiaChip};

// Macros
pub use crate::trace_dump;

// Conditional testing utilities
#[cfg(feature = "testing-utils")]
pub use crate::tia::test_utils::*;
