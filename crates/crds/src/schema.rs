//! OpenAPI schemas for string enums
//!
//! Kubernetes requires a structural schema: every property has a `type` and
//! `anyOf`/`oneOf` branches carry no `type` or `description`. String enums
//! therefore render as a flat `type: string` with their `enum` values, which
//! stays structural when the field is optional.

use schemars::{Schema, json_schema};

/// Flat `type: string` schema restricted to the given values
pub(crate) fn string_enum<'a>(values: impl IntoIterator<Item = &'a str>) -> Schema {
    let values: Vec<&str> = values.into_iter().collect();
    json_schema!({
        "type": "string",
        "enum": values,
    })
}

/// Implement `JsonSchema` for a unit enum with `VARIANTS` and `as_str()`
macro_rules! string_enum_schema {
    ($ty:ident) => {
        impl schemars::JsonSchema for $ty {
            fn schema_name() -> std::borrow::Cow<'static, str> {
                stringify!($ty).into()
            }

            fn json_schema(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
                $crate::schema::string_enum($ty::VARIANTS.iter().map($ty::as_str))
            }
        }
    };
}

pub(crate) use string_enum_schema;
