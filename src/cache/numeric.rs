//! Numeric Payload Module
//!
//! Closed view over the numeric kinds that increment/decrement understand.

use crate::error::NumericFamily;

// == Numeric View ==
/// Mutable view of a payload's concrete numeric kind.
#[derive(Debug)]
pub enum Numeric<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    /// Not a number; arithmetic fails with `WrongType`
    Unsupported,
}

/// Whether a step adds or subtracts its delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Up,
    Down,
}

macro_rules! step_integer {
    ($slot:expr, $ty:ty, $delta:expr, $direction:expr) => {{
        let delta = $delta as $ty;
        *$slot = match $direction {
            Direction::Up => $slot.wrapping_add(delta),
            Direction::Down => $slot.wrapping_sub(delta),
        };
        true
    }};
}

impl Numeric<'_> {
    /// Family of this kind, or None when unsupported.
    pub fn family(&self) -> Option<NumericFamily> {
        match self {
            Numeric::F32(_) | Numeric::F64(_) => Some(NumericFamily::Float),
            Numeric::Unsupported => None,
            _ => Some(NumericFamily::Integer),
        }
    }

    /// Applies an integer delta in place.
    ///
    /// The delta is truncated to the payload width and arithmetic wraps on
    /// overflow. Returns false, leaving the payload untouched, for any
    /// non-integer kind.
    pub(crate) fn step_integer(self, delta: i64, direction: Direction) -> bool {
        match self {
            Numeric::I8(v) => step_integer!(v, i8, delta, direction),
            Numeric::I16(v) => step_integer!(v, i16, delta, direction),
            Numeric::I32(v) => step_integer!(v, i32, delta, direction),
            Numeric::I64(v) => step_integer!(v, i64, delta, direction),
            Numeric::Isize(v) => step_integer!(v, isize, delta, direction),
            Numeric::U8(v) => step_integer!(v, u8, delta, direction),
            Numeric::U16(v) => step_integer!(v, u16, delta, direction),
            Numeric::U32(v) => step_integer!(v, u32, delta, direction),
            Numeric::U64(v) => step_integer!(v, u64, delta, direction),
            Numeric::Usize(v) => step_integer!(v, usize, delta, direction),
            Numeric::F32(_) | Numeric::F64(_) | Numeric::Unsupported => false,
        }
    }

    /// Applies a floating delta in place; false for non-float kinds.
    pub(crate) fn step_float(self, delta: f64, direction: Direction) -> bool {
        let delta = match direction {
            Direction::Up => delta,
            Direction::Down => -delta,
        };
        match self {
            Numeric::F32(v) => *v += delta as f32,
            Numeric::F64(v) => *v += delta,
            _ => return false,
        }
        true
    }
}

// == As Numeric ==
/// Payload types that expose their runtime numeric kind.
///
/// Implement this for a custom payload to make it usable with
/// `Cache::increment` and friends; return `Numeric::Unsupported` for values
/// that hold no number.
pub trait AsNumeric {
    fn as_numeric(&mut self) -> Numeric<'_>;
}

macro_rules! impl_as_numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl AsNumeric for $ty {
                fn as_numeric(&mut self) -> Numeric<'_> {
                    Numeric::$variant(self)
                }
            }
        )*
    };
}

impl_as_numeric! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
}

macro_rules! impl_not_numeric {
    ($($ty:ty),*) => {
        $(
            impl AsNumeric for $ty {
                fn as_numeric(&mut self) -> Numeric<'_> {
                    Numeric::Unsupported
                }
            }
        )*
    };
}

impl_not_numeric!(String, bool, char);
