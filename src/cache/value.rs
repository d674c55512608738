//! Dynamic Value Module
//!
//! A payload type that lets a single cache hold values of different kinds.

use serde::{Deserialize, Serialize};

use crate::cache::numeric::{AsNumeric, Numeric};

// == Value ==
/// A dynamically typed payload.
///
/// Arithmetic only applies to the numeric variants, and each variant keeps
/// its own width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
}

impl AsNumeric for Value {
    fn as_numeric(&mut self) -> Numeric<'_> {
        match self {
            Value::I8(v) => Numeric::I8(v),
            Value::I16(v) => Numeric::I16(v),
            Value::I32(v) => Numeric::I32(v),
            Value::I64(v) => Numeric::I64(v),
            Value::Isize(v) => Numeric::Isize(v),
            Value::U8(v) => Numeric::U8(v),
            Value::U16(v) => Numeric::U16(v),
            Value::U32(v) => Numeric::U32(v),
            Value::U64(v) => Numeric::U64(v),
            Value::Usize(v) => Numeric::Usize(v),
            Value::F32(v) => Numeric::F32(v),
            Value::F64(v) => Numeric::F64(v),
            Value::Null | Value::Bool(_) | Value::Str(_) | Value::Bytes(_) => {
                Numeric::Unsupported
            }
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize,
    f32 => F32, f64 => F64,
    String => Str, Vec<u8> => Bytes,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}
