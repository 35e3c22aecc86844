//! Typed handles to registered options.

use std::marker::PhantomData;

use crate::value::{TypedValue, ValueKind};

/// A Rust type that can back an option value.
pub trait OptionType: Sized {
    /// Kind of the value cell created for this type.
    const KIND: ValueKind;

    /// Wraps the native value in a value cell.
    fn into_value(self) -> TypedValue;

    /// Reads the native value back out, if the cell has the right kind.
    fn from_value(value: &TypedValue) -> Option<Self>;
}

macro_rules! impl_option_type {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl OptionType for $ty {
            const KIND: ValueKind = ValueKind::$kind;

            fn into_value(self) -> TypedValue {
                TypedValue::$variant(self)
            }

            fn from_value(value: &TypedValue) -> Option<Self> {
                match value {
                    TypedValue::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_option_type!(bool, Bool, Bool);
impl_option_type!(i64, Int, Int);
impl_option_type!(f64, Float, Float);
impl_option_type!(String, String, String);
impl_option_type!(Vec<u8>, Bytes, Bytes);
impl_option_type!(Vec<String>, StringList, StringList);

/// Handle to a registered option holding a `T`.
///
/// Only meaningful for the registry that returned it.
#[derive(Debug)]
pub struct OptionHandle<T> {
    index: usize,
    _kind: PhantomData<fn() -> T>,
}

impl<T> OptionHandle<T> {
    pub(crate) fn new(index: usize) -> Self {
        Self {
            index,
            _kind: PhantomData,
        }
    }

    /// Position of the option in registration order.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for OptionHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OptionHandle<T> {}
