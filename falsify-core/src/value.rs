//! Type-erased parameter values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Bound for anything that can travel as a property parameter.
pub trait Parameter: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn dyn_eq(&self, other: &dyn Parameter) -> bool;
}

impl<T> Parameter for T
where
    T: Any + fmt::Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Parameter) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .map_or(false, |other| self == other)
    }
}

/// A cheaply clonable value of any parameter type.
///
/// Tuples of heterogeneous parameters are carried as `Vec<AnyValue>`.
/// Values compare equal when they have the same concrete type and are
/// equal under that type's `PartialEq`.
#[derive(Clone)]
pub struct AnyValue(Arc<dyn Parameter>);

impl AnyValue {
    pub fn new<T>(value: T) -> Self
    where
        T: Parameter,
    {
        AnyValue(Arc::new(value))
    }

    /// Borrow the value as `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    /// Whether the value is of type `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl PartialEq for AnyValue {
    fn eq(&self, other: &Self) -> bool {
        self.0.dyn_eq(&*other.0)
    }
}

/// Shorthand for building expected samples in assertions.
///
/// ```
/// use falsify_core::sample;
/// let expected = sample![5, 1, 1, 1];
/// assert_eq!(expected.len(), 4);
/// ```
#[macro_export]
macro_rules! sample {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::value::AnyValue::new($value)),*]
    };
}
