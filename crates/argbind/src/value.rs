//! Value shapes and conversions into destination field types.
//!
//! Every bindable field type implements [`BindValue`], which reports the
//! field's [`ValueKind`] (driving how tokens are matched and coerced) and
//! converts a coerced [`Value`] into the field type. Integer conversions use
//! `as` casts, so values wider than the field wrap to its width.

use std::fmt;

/// The shape a bound field expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Str,
    /// Signed integer of the given bit width.
    Int(u32),
    /// Unsigned integer of the given bit width.
    Uint(u32),
    /// Floating point number of the given bit width.
    Float(u32),
    Bool,
    StrList,
    IntList,
    /// Fixed-size string array of the given length.
    StrArray(usize),
    /// Fixed-size integer array of the given length.
    IntArray(usize),
}

impl ValueKind {
    /// Kinds that consume exactly one value token.
    pub fn is_scalar(self) -> bool {
        matches!(self, Self::Str | Self::Int(_) | Self::Uint(_) | Self::Float(_))
    }

    /// Kinds that consume a run of value tokens. Arrays cap the run at their length.
    pub fn window(self) -> Option<usize> {
        match self {
            Self::StrList | Self::IntList => Some(usize::MAX),
            Self::StrArray(len) | Self::IntArray(len) => Some(len),
            _ => None,
        }
    }

    /// Whether a field of this kind may receive the trailing run.
    pub fn accepts_trailing(self) -> bool {
        matches!(self, Self::Str | Self::StrList | Self::StrArray(_))
    }

    /// What a raw value must look like for this kind, as used in error messages.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Str | Self::StrList | Self::StrArray(_) => "string",
            Self::Int(_) | Self::Uint(_) | Self::IntList | Self::IntArray(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => f.write_str("string"),
            Self::Int(bits) => write!(f, "i{bits}"),
            Self::Uint(bits) => write!(f, "u{bits}"),
            Self::Float(bits) => write!(f, "f{bits}"),
            Self::Bool => f.write_str("bool"),
            Self::StrList => f.write_str("string list"),
            Self::IntList => f.write_str("integer list"),
            Self::StrArray(len) => write!(f, "string array [{len}]"),
            Self::IntArray(len) => write!(f, "integer array [{len}]"),
        }
    }
}

/// A coerced value, ready to be stored into a field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i128),
    Float(f64),
    Bool(bool),
    StrList(Vec<String>),
    IntList(Vec<i128>),
}

impl Value {
    fn describe(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
            Self::StrList(_) => "string list",
            Self::IntList(_) => "integer list",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("got '{value}', expected {expected}")]
    Invalid {
        value: String,
        expected: &'static str,
    },

    #[error("got {found} value, expected {expected}")]
    Mismatch {
        found: &'static str,
        expected: &'static str,
    },
}

impl ValueError {
    fn mismatch<F: BindValue>(value: &Value) -> Self {
        Self::Mismatch {
            found: value.describe(),
            expected: F::kind().expected(),
        }
    }
}

/// A field type the binder can write.
pub trait BindValue: Sized {
    fn kind() -> ValueKind;
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

/// An element type of list and array fields.
pub trait Element: Sized + Default {
    const LIST: ValueKind;

    fn array(len: usize) -> ValueKind;
    fn from_list(value: Value) -> Result<Vec<Self>, ValueError>;
}

/// Store `value` into `slot`. This is the writer body generated by `#[derive(Bind)]`.
pub fn assign<F: BindValue>(slot: &mut F, value: Value) -> Result<(), ValueError> {
    *slot = F::from_value(value)?;
    Ok(())
}

impl BindValue for String {
    fn kind() -> ValueKind {
        ValueKind::Str
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(ValueError::mismatch::<Self>(&other)),
        }
    }
}

impl BindValue for bool {
    fn kind() -> ValueKind {
        ValueKind::Bool
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueError::mismatch::<Self>(&other)),
        }
    }
}

macro_rules! bind_integer {
    ($variant:ident => $($ty:ty),*) => {$(
        impl BindValue for $ty {
            fn kind() -> ValueKind {
                ValueKind::$variant(<$ty>::BITS)
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Int(n) => Ok(n as $ty),
                    other => Err(ValueError::mismatch::<Self>(&other)),
                }
            }
        }

        impl Element for $ty {
            const LIST: ValueKind = ValueKind::IntList;

            fn array(len: usize) -> ValueKind {
                ValueKind::IntArray(len)
            }

            fn from_list(value: Value) -> Result<Vec<Self>, ValueError> {
                match value {
                    Value::IntList(items) => Ok(items.into_iter().map(|n| n as $ty).collect()),
                    other => Err(ValueError::Mismatch {
                        found: other.describe(),
                        expected: "integer list",
                    }),
                }
            }
        }
    )*};
}

bind_integer!(Int => i8, i16, i32, i64, i128, isize);
bind_integer!(Uint => u8, u16, u32, u64, u128, usize);

macro_rules! bind_float {
    ($($ty:ty => $bits:expr),*) => {$(
        impl BindValue for $ty {
            fn kind() -> ValueKind {
                ValueKind::Float($bits)
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Float(x) => Ok(x as $ty),
                    other => Err(ValueError::mismatch::<Self>(&other)),
                }
            }
        }
    )*};
}

bind_float!(f32 => 32, f64 => 64);

impl Element for String {
    const LIST: ValueKind = ValueKind::StrList;

    fn array(len: usize) -> ValueKind {
        ValueKind::StrArray(len)
    }

    fn from_list(value: Value) -> Result<Vec<Self>, ValueError> {
        match value {
            Value::StrList(items) => Ok(items),
            other => Err(ValueError::Mismatch {
                found: other.describe(),
                expected: "string list",
            }),
        }
    }
}

impl<T: Element> BindValue for Vec<T> {
    fn kind() -> ValueKind {
        T::LIST
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        T::from_list(value)
    }
}

impl<T: Element, const N: usize> BindValue for [T; N] {
    fn kind() -> ValueKind {
        T::array(N)
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        let items = T::from_list(value)?;
        let mut out: [T; N] = std::array::from_fn(|_| T::default());
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item;
        }
        Ok(out)
    }
}
