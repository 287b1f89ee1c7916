//! Built-in C# type keywords and the `System` types they alias, plus the framework
//! value types without a keyword.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Namespace of every aliased type.
pub const SYSTEM: &str = "System";

const KEYWORD_TYPES: [(&str, &str); 18] = [
    ("bool", "Boolean"),
    ("byte", "Byte"),
    ("sbyte", "SByte"),
    ("short", "Int16"),
    ("ushort", "UInt16"),
    ("char", "Char"),
    ("int", "Int32"),
    ("uint", "UInt32"),
    ("long", "Int64"),
    ("ulong", "UInt64"),
    ("nint", "IntPtr"),
    ("nuint", "UIntPtr"),
    ("float", "Single"),
    ("double", "Double"),
    ("decimal", "Decimal"),
    ("string", "String"),
    ("object", "Object"),
    ("void", "Void"),
];

static BY_KEYWORD: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| KEYWORD_TYPES.into_iter().collect());

static BY_TYPE_NAME: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    KEYWORD_TYPES
        .into_iter()
        .map(|(keyword, name)| (name, keyword))
        .collect()
});

/// Name of the `System` type a keyword aliases (`int` -> `Int32`).
pub fn keyword_type(keyword: &str) -> Option<&'static str> {
    BY_KEYWORD.get(keyword).copied()
}

/// Keyword aliasing `namespace.name`, if there is one (`System.String` -> `string`).
pub fn type_keyword(namespace: &str, name: &str) -> Option<&'static str> {
    if namespace != SYSTEM {
        return None;
    }

    BY_TYPE_NAME.get(name).copied()
}

pub fn is_keyword(ident: &str) -> bool {
    BY_KEYWORD.contains_key(ident)
}

/// Keywords naming value types, which become `System.Nullable<T>` under `?`.
pub fn is_value_keyword(keyword: &str) -> bool {
    is_keyword(keyword) && !matches!(keyword, "string" | "object" | "void")
}

/// Framework structs without a keyword, as `(namespace, name)`.
const FRAMEWORK_STRUCTS: [(&str, &str); 14] = [
    (SYSTEM, "DateTime"),
    (SYSTEM, "DateTimeOffset"),
    (SYSTEM, "DateOnly"),
    (SYSTEM, "TimeOnly"),
    (SYSTEM, "TimeSpan"),
    (SYSTEM, "Guid"),
    (SYSTEM, "Half"),
    (SYSTEM, "Int128"),
    (SYSTEM, "UInt128"),
    (SYSTEM, "Index"),
    (SYSTEM, "Range"),
    (SYSTEM, "ValueTuple"),
    ("System.Numerics", "BigInteger"),
    ("System.Collections.Generic", "KeyValuePair"),
];

static FRAMEWORK_STRUCT_SET: LazyLock<HashSet<(&'static str, &'static str)>> =
    LazyLock::new(|| FRAMEWORK_STRUCTS.into_iter().collect());

/// Check, if `namespace.name` is a framework value type, keyword or not.
///
/// Generic structs (`ValueTuple<T1, T2>`, `KeyValuePair<K, V>`) are listed by name only.
pub fn is_framework_struct(namespace: &str, name: &str) -> bool {
    type_keyword(namespace, name).is_some_and(is_value_keyword)
        || FRAMEWORK_STRUCT_SET.contains(&(namespace, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        assert_eq!(keyword_type("int"), Some("Int32"));
        assert_eq!(type_keyword("System", "Int32"), Some("int"));
        assert_eq!(type_keyword("System", "String"), Some("string"));
    }

    #[test]
    fn test_framework_structs() {
        assert!(is_framework_struct("System", "DateTime"));
        assert!(is_framework_struct("System", "Int32"));
        assert!(is_framework_struct("System.Collections.Generic", "KeyValuePair"));
        assert!(!is_framework_struct("System", "String"));
        assert!(!is_framework_struct("MyApp", "DateTime"));
    }

    #[test]
    fn test_only_system_namespace() {
        assert_eq!(type_keyword("MyApp", "String"), None);
        assert_eq!(type_keyword("", "Int32"), None);
    }

    #[test]
    fn test_value_keywords() {
        assert!(is_value_keyword("int"));
        assert!(is_value_keyword("decimal"));
        assert!(!is_value_keyword("string"));
        assert!(!is_value_keyword("object"));
        assert!(!is_value_keyword("Task"));
    }
}
