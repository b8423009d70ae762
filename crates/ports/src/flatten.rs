//! Flattening engine for nested loggable values.

use crate::field::{Field, FieldValue};

/// Expand every object field into the fields its [`Loggable`] produces.
///
/// Nested objects are expanded recursively and spliced in at the position of
/// the original field, so relative order is preserved throughout. The result
/// never contains an object field; backend adapters iterate over it instead
/// of dealing with [`Loggable`] themselves.
///
/// There is no depth bound. A cyclic object graph never terminates.
///
/// [`Loggable`]: crate::field::Loggable
///
/// ```
/// use fieldlog_ports::{Field, flatten_fields};
///
/// let nested = vec![Field::i64("a", 1), Field::i64("b", 2)];
/// let flat = flatten_fields(vec![Field::bool("x", true), Field::object(nested)]);
/// let keys: Vec<&str> = flat.iter().map(Field::key).collect();
/// assert_eq!(keys, ["x", "a", "b"]);
/// ```
#[must_use]
pub fn flatten_fields(fields: Vec<Field>) -> Vec<Field> {
    let mut flat = Vec::with_capacity(fields.len());
    flatten_into(fields, &mut flat);
    flat
}

/// Returns true when no field carries a nested object.
#[must_use]
pub fn is_flat(fields: &[Field]) -> bool {
    !fields.iter().any(|field| field.value().is_object())
}

fn flatten_into(fields: Vec<Field>, flat: &mut Vec<Field>) {
    for field in fields {
        if let FieldValue::Object(object) = field.value() {
            let nested = object.to_log();
            flatten_into(nested, flat);
        } else {
            flat.push(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Loggable;
    use proptest::prelude::*;
    use std::sync::Arc;

    struct A {
        a: i64,
    }

    impl Loggable for A {
        fn to_log(&self) -> Vec<Field> {
            vec![Field::i64("key_2", self.a)]
        }
    }

    struct B {
        a: A,
        b: i64,
    }

    impl Loggable for B {
        fn to_log(&self) -> Vec<Field> {
            vec![
                Field::object(A { a: self.a.a }),
                Field::i64("key_3", self.b),
            ]
        }
    }

    struct Pair;

    impl Loggable for Pair {
        fn to_log(&self) -> Vec<Field> {
            vec![
                Field::string("a", "first"),
                Field::object(vec![Field::string("c", "third"), Field::string("d", "fourth")]),
            ]
        }
    }

    #[test]
    fn builtin_fields_pass_through() {
        let fields = vec![Field::i64("key_1", 1)];
        assert_eq!(flatten_fields(fields.clone()), fields);
    }

    #[test]
    fn expands_loggable() {
        let fields = vec![Field::i64("key_1", 1), Field::object(A { a: 2 })];
        assert_eq!(
            flatten_fields(fields),
            vec![Field::i64("key_1", 1), Field::i64("key_2", 2)]
        );
    }

    #[test]
    fn expands_nested_loggable() {
        let fields = vec![
            Field::i64("key_1", 1),
            Field::object(B {
                a: A { a: 2 },
                b: 3,
            }),
        ];
        assert_eq!(
            flatten_fields(fields),
            vec![
                Field::i64("key_1", 1),
                Field::i64("key_2", 2),
                Field::i64("key_3", 3),
            ]
        );
    }

    #[test]
    fn splices_at_original_position() {
        let fields = vec![
            Field::string("x", "before"),
            Field::object(Pair),
            Field::string("y", "after"),
        ];
        let keys: Vec<String> = flatten_fields(fields)
            .into_iter()
            .map(|field| field.into_parts().0)
            .collect();
        assert_eq!(keys, vec!["x", "a", "c", "d", "y"]);
    }

    #[test]
    fn empty_objects_vanish() {
        let fields = vec![
            Field::bool("kept", true),
            Field::object(Vec::<Field>::new()),
        ];
        let flat = flatten_fields(fields);
        assert_eq!(flat, vec![Field::bool("kept", true)]);
        assert!(is_flat(&flat));
    }

    #[test]
    fn shared_object_is_expanded_each_time() {
        let shared: Arc<dyn Loggable> = Arc::new(vec![Field::u8("n", 7)]);
        let fields = vec![
            Field::shared_object(Arc::clone(&shared)),
            Field::shared_object(shared),
        ];
        assert_eq!(
            flatten_fields(fields),
            vec![Field::u8("n", 7), Field::u8("n", 7)]
        );
    }

    fn leaf() -> impl Strategy<Value = Field> {
        prop_oneof![
            ("[a-z]{1,6}", any::<i64>()).prop_map(|(key, value)| Field::i64(key, value)),
            ("[a-z]{1,6}", any::<bool>()).prop_map(|(key, value)| Field::bool(key, value)),
            ("[a-z]{1,6}", "[ -~]{0,12}").prop_map(|(key, value)| Field::string(key, value)),
        ]
    }

    fn field_tree() -> impl Strategy<Value = Field> {
        leaf().prop_recursive(4, 32, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Field::object)
        })
    }

    fn leaf_count(field: &Field) -> usize {
        match field.value() {
            FieldValue::Object(object) => object.to_log().iter().map(leaf_count).sum(),
            _ => 1,
        }
    }

    proptest! {
        #[test]
        fn flattening_is_idempotent(fields in prop::collection::vec(field_tree(), 0..8)) {
            let once = flatten_fields(fields);
            let twice = flatten_fields(once.clone());
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn flattening_keeps_every_leaf(fields in prop::collection::vec(field_tree(), 0..8)) {
            let expected: usize = fields.iter().map(leaf_count).sum();
            let flat = flatten_fields(fields);
            prop_assert!(is_flat(&flat));
            prop_assert_eq!(flat.len(), expected);
        }
    }
}
