//! Macros for declaring tables and records.
//!
//! [`define_table!`] generates a module holding a table's name, its field
//! mapping and a constructor for the [`Table`](crate::Table) handle.
//! [`record!`] builds the field → value lists accepted by inserts and updates.

/// Defines a module describing one table.
///
/// # Syntax
///
/// ```rust
/// use sqlchain::define_table;
///
/// define_table!(
///     blog {
///         table: "blog",
///         columns: {
///             "id" => "id",
///             "authorId" => "author_id",
///         }
///     }
/// );
///
/// assert_eq!(blog::TABLE, "blog");
/// assert_eq!(blog::COLUMNS[1], ("authorId", "author_id"));
///
/// let statement = blog::table()
///     .filter(|b| b["authorId"].equals(1))
///     .select()
///     .generate()
///     .unwrap();
/// assert_eq!(statement.sql, "SELECT *\nFROM blog t1\nWHERE t1.author_id = ?");
/// ```
#[macro_export]
macro_rules! define_table {
    (
        $module:ident {
            table: $table:literal,
            columns: {
                $($field:literal => $column:literal),* $(,)?
            }
        }
    ) => {
        pub mod $module {
            pub const TABLE: &str = $table;

            /// `(field, column)` pairs in declaration order.
            pub const COLUMNS: &[(&str, &str)] = &[$(($field, $column)),*];

            pub fn table() -> $crate::Table {
                $crate::Table::new(TABLE, COLUMNS.iter().copied())
            }
        }
    };
}

/// Builds a record: an ordered list of field keys and values.
///
/// ```rust
/// use sqlchain::{record, Value};
///
/// let row = record! { "title" => "Hello", "draft" => false };
/// assert_eq!(row[1], ("draft".to_string(), Value::Bool(false)));
/// ```
#[macro_export]
macro_rules! record {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Value)>::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::string::String::from($field), $crate::Value::from($value))),+]
    };
}
