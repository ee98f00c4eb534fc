use crate::graph::{InstanceId, OutputRef};
use crate::Result;
use hydrate_core::{bail, err, Value};

/// Builds an application value from one materialized output.
///
/// Implemented by hand for application types, usually by reading members
/// through [`EntityRef`](crate::EntityRef):
///
/// ```
/// use hydrate::{Load, OutputRef, Result};
///
/// struct LineItem {
///     id: i64,
///     name: String,
/// }
///
/// impl Load for LineItem {
///     fn load(output: OutputRef<'_>) -> Result<Self> {
///         let item = output.expect_entity()?;
///         Ok(LineItem {
///             id: item.field("id")?,
///             name: item.field("name")?,
///         })
///     }
/// }
/// ```
pub trait Load: Sized {
    fn load(output: OutputRef<'_>) -> Result<Self>;
}

impl Load for Value {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        Ok(output.expect_value()?.clone())
    }
}

impl<T: Load> Load for Option<T> {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        match output {
            OutputRef::Value(Value::Null) => Ok(None),
            output => T::load(output).map(Some),
        }
    }
}

impl Load for InstanceId {
    fn load(output: OutputRef<'_>) -> Result<Self> {
        Ok(output.expect_entity()?.id())
    }
}

macro_rules! impl_load_value {
    ( $( $ty:ty ),* ) => {
        $(
            impl Load for $ty {
                fn load(output: OutputRef<'_>) -> Result<Self> {
                    <$ty>::try_from(output.expect_value()?.clone())
                }
            }
        )*
    };
}

impl_load_value!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    String,
    Vec<u8>,
    uuid::Uuid
);

macro_rules! impl_load_tuple {
    ( $len:literal => $( $n:tt $t:ident ),+ ) => {
        impl<$( $t: Load ),+> Load for ( $( $t, )+ ) {
            fn load(output: OutputRef<'_>) -> Result<Self> {
                let elements: Vec<OutputRef<'_>> = match output {
                    OutputRef::Compound(compound) => compound.iter().collect(),
                    OutputRef::Tuple(tuple) => tuple.iter().collect(),
                    output => bail!("expected a compound, found {}", output.kind()),
                };

                if elements.len() != $len {
                    bail!(
                        "expected a compound of {} elements, found {}",
                        $len,
                        elements.len()
                    );
                }

                Ok(( $(
                    $t::load(elements[$n])
                        .map_err(|e| e.context(err!("loading element {}", $n)))?,
                )+ ))
            }
        }
    };
}

impl_load_tuple!(1 => 0 T0);
impl_load_tuple!(2 => 0 T0, 1 T1);
impl_load_tuple!(3 => 0 T0, 1 T1, 2 T2);
impl_load_tuple!(4 => 0 T0, 1 T1, 2 T2, 3 T3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_of_null_is_none() {
        let null = Value::Null;
        let loaded = <Option<i64>>::load(OutputRef::Value(&null)).unwrap();
        assert_eq!(loaded, None);

        let value = Value::I32(7);
        let loaded = <Option<i64>>::load(OutputRef::Value(&value)).unwrap();
        assert_eq!(loaded, Some(7));
    }

    #[test]
    fn integer_is_coerced_on_load() {
        let value = Value::I64(300);
        assert_eq!(u16::load(OutputRef::Value(&value)).unwrap(), 300);
        assert!(u8::load(OutputRef::Value(&value)).unwrap_err().is_type_coercion());
    }

    #[test]
    fn null_into_required_fails() {
        let null = Value::Null;
        let err = String::load(OutputRef::Value(&null)).unwrap_err();
        assert!(err.is_type_coercion());
    }

    #[test]
    fn bytes_and_uuid() {
        let id = uuid::Uuid::new_v4();

        let bytes = Value::Bytes(id.as_bytes().to_vec());
        assert_eq!(<Vec<u8>>::load(OutputRef::Value(&bytes)).unwrap(), id.as_bytes());
        assert_eq!(uuid::Uuid::load(OutputRef::Value(&bytes)).unwrap(), id);
    }
}
