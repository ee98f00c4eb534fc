/// Builds a [`Row`](crate::Row) from `column => value` pairs.
///
/// ```
/// let row = hydrate_core::row! {
///     "order_id" => 1i64,
///     "sku" => "A",
/// };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };
    (
        $( $column:expr => $value:expr ),+ $(,)?
    ) => {
        $crate::Row::new() $( .with($column, $value) )+
    };
}
