use super::{Type, Value};
use crate::{Error, Result};

/// A numeric source value widened to a representation that holds every
/// supported variant without loss.
#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Type {
    /// Converts a raw column value into this type.
    ///
    /// `column` names the column being read and is reported by the
    /// `TypeCoercion` error on failure. Values that already have this type are
    /// passed through untouched. Numeric conversions never truncate: narrowing
    /// is range checked and integer/float conversions must be exact.
    pub fn coerce(&self, column: Option<&str>, value: Value) -> Result<Value> {
        match (self, value) {
            (Self::Option(_), Value::Null) => Ok(Value::Null),
            (Self::Option(inner), value) => inner.coerce(column, value),
            (ty, Value::Null) => Err(Error::type_coercion_because(
                column,
                Type::Null,
                ty.clone(),
                "target is not nullable",
            )),
            (ty, value) if value.infer_ty() == *ty => Ok(value),
            (ty, value) if ty.is_numeric() => coerce_numeric(column, ty, value),
            (Self::Uuid, Value::String(s)) => match uuid::Uuid::parse_str(&s) {
                Ok(uuid) => Ok(Value::Uuid(uuid)),
                Err(_) => Err(Error::type_coercion_because(
                    column,
                    Type::String,
                    Type::Uuid,
                    format!("cannot parse {s:?} as Uuid"),
                )),
            },
            (Self::Uuid, Value::Bytes(bytes)) => match uuid::Uuid::from_slice(&bytes) {
                Ok(uuid) => Ok(Value::Uuid(uuid)),
                Err(_) => Err(Error::type_coercion_because(
                    column,
                    Type::Bytes,
                    Type::Uuid,
                    format!("expected 16 bytes, found {}", bytes.len()),
                )),
            },
            (ty, value) => Err(Error::type_coercion(column, value.infer_ty(), ty.clone())),
        }
    }
}

fn coerce_numeric(column: Option<&str>, ty: &Type, value: Value) -> Result<Value> {
    let from = value.infer_ty();
    let fail =
        |reason: String| Error::type_coercion_because(column, from.clone(), ty.clone(), reason);

    let number = match value {
        Value::I8(v) => Number::Int(v.into()),
        Value::I16(v) => Number::Int(v.into()),
        Value::I32(v) => Number::Int(v.into()),
        Value::I64(v) => Number::Int(v.into()),
        Value::U8(v) => Number::Int(v.into()),
        Value::U16(v) => Number::Int(v.into()),
        Value::U32(v) => Number::Int(v.into()),
        Value::U64(v) => Number::Int(v.into()),
        Value::F32(v) => Number::Float(v.into()),
        Value::F64(v) => Number::Float(v),
        Value::String(ref s) => parse_number(ty, s)
            .ok_or_else(|| fail(format!("cannot parse {s:?} as {ty}")))?,
        value => return Err(Error::type_coercion(column, value.infer_ty(), ty.clone())),
    };

    let converted = match ty {
        Type::F64 => to_f64(number).map(Value::F64),
        Type::F32 => to_f32(number).map(Value::F32),
        _ => to_i128(number).and_then(|int| narrow(ty, int)),
    };

    converted.map_err(fail)
}

fn parse_number(ty: &Type, s: &str) -> Option<Number> {
    if ty.is_integer() {
        s.trim().parse::<i128>().ok().map(Number::Int)
    } else {
        s.trim().parse::<f64>().ok().map(Number::Float)
    }
}

fn to_i128(number: Number) -> core::result::Result<i128, String> {
    match number {
        Number::Int(v) => Ok(v),
        Number::Float(v) if !v.is_finite() => Err(format!("value {v} is not finite")),
        Number::Float(v) if v.fract() != 0.0 => Err(format!("value {v} is not integral")),
        Number::Float(v) => {
            // `as` saturates; a round trip detects values beyond i128.
            let int = v as i128;
            if int as f64 == v {
                Ok(int)
            } else {
                Err(format!("value {v} is out of range"))
            }
        }
    }
}

fn to_f64(number: Number) -> core::result::Result<f64, String> {
    match number {
        Number::Float(v) => Ok(v),
        Number::Int(v) => {
            let float = v as f64;
            if float as i128 == v {
                Ok(float)
            } else {
                Err(format!("value {v} cannot be represented exactly"))
            }
        }
    }
}

fn to_f32(number: Number) -> core::result::Result<f32, String> {
    match number {
        Number::Float(v) if v.is_finite() && v.abs() > f64::from(f32::MAX) => {
            Err(format!("value {v} is out of range"))
        }
        Number::Float(v) => Ok(v as f32),
        Number::Int(v) => {
            let float = v as f32;
            if float as i128 == v {
                Ok(float)
            } else {
                Err(format!("value {v} cannot be represented exactly"))
            }
        }
    }
}

fn narrow(ty: &Type, int: i128) -> core::result::Result<Value, String> {
    let out_of_range = || format!("value {int} is out of range");

    Ok(match ty {
        Type::I8 => Value::I8(int.try_into().map_err(|_| out_of_range())?),
        Type::I16 => Value::I16(int.try_into().map_err(|_| out_of_range())?),
        Type::I32 => Value::I32(int.try_into().map_err(|_| out_of_range())?),
        Type::I64 => Value::I64(int.try_into().map_err(|_| out_of_range())?),
        Type::U8 => Value::U8(int.try_into().map_err(|_| out_of_range())?),
        Type::U16 => Value::U16(int.try_into().map_err(|_| out_of_range())?),
        Type::U32 => Value::U32(int.try_into().map_err(|_| out_of_range())?),
        Type::U64 => Value::U64(int.try_into().map_err(|_| out_of_range())?),
        _ => return Err(format!("{ty} is not an integer type")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_float_to_int() {
        assert_eq!(
            Type::I32.coerce(Some("qty"), Value::F64(42.0)).unwrap(),
            Value::I32(42)
        );
    }

    #[test]
    fn fractional_float_to_int_fails() {
        let err = Type::I32.coerce(Some("qty"), Value::F64(4.5)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot coerce column `qty` from F64 to I32: value 4.5 is not integral"
        );
    }

    #[test]
    fn large_int_to_f64_fails() {
        let value = Value::I64((1 << 53) + 1);
        assert!(Type::F64.coerce(None, value).unwrap_err().is_type_coercion());
    }

    #[test]
    fn f64_to_f32_out_of_range_fails() {
        assert!(Type::F32.coerce(None, Value::F64(1e300)).is_err());
        assert_eq!(
            Type::F32.coerce(None, Value::F64(0.5)).unwrap(),
            Value::F32(0.5)
        );
    }
}
