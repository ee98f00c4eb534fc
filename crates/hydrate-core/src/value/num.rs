use super::{Type, Value};
use crate::{Error, Result};

macro_rules! impl_num {
    (
        $(
            $variant:ident($ty:ty) {
                $is:ident
            } )*
    ) => {
        impl Value {
            $(
                pub fn $is(&self) -> bool {
                    matches!(self, Self::$variant(_))
                }
            )*
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<&$ty> for Value {
                fn from(value: &$ty) -> Self {
                    Self::$variant(*value)
                }
            }

            // Cross-type conversions go through `Type::coerce`, which range
            // checks narrowing and rejects lossy float conversions.
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match Type::$variant.coerce(None, value)? {
                        Value::$variant(val) => Ok(val),
                        value => Err(Error::type_coercion(None, value.infer_ty(), Type::$variant)),
                    }
                }
            }
        )*
    };
}

impl_num! {
    I8(i8) {
        is_i8
    }
    I16(i16) {
        is_i16
    }
    I32(i32) {
        is_i32
    }
    I64(i64) {
        is_i64
    }
    U8(u8) {
        is_u8
    }
    U16(u16) {
        is_u16
    }
    U32(u32) {
        is_u32
    }
    U64(u64) {
        is_u64
    }
    F32(f32) {
        is_f32
    }
    F64(f64) {
        is_f64
    }
}

impl TryFrom<Value> for usize {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        let from = value.infer_ty();
        let val = u64::try_from(value)?;
        val.try_into().map_err(|_| {
            Error::type_coercion_because(
                None,
                from,
                Type::U64,
                format!("value {val} is out of range for usize"),
            )
        })
    }
}
