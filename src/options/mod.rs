//! Option definitions and the option registry.
//!
//! Options are registered once, before parsing. Each one owns a typed value
//! cell that parsing and preference loading mutate in place; callers read the
//! results back through the [`OptionHandle`] returned at registration.

pub mod handle;
pub mod registry;

pub use handle::{OptionHandle, OptionType};
pub use registry::{ChangeHook, OptionDef, OptionRegistry, OptionTable, SaveHook};

use std::ops::BitOr;

/// Behaviour flags of an option. Combine with `|`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OptionFlags(u8);

impl OptionFlags {
    /// Plain command line option.
    pub const STANDARD: Self = Self(1);
    /// Saved to and loaded from the preferences document.
    pub const PREFERENCE: Self = Self(1 << 1);
    /// Must be set to something other than its default before dispatch.
    pub const REQUIRED: Self = Self(1 << 2);
    /// Left out of the usage text.
    pub const HIDDEN: Self = Self(1 << 3);

    /// Returns true if every flag in `other` is set.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
