//! Generic collection helpers.
//!
//! Both helpers are bounded at compile time: passing something that is not an
//! ordered collection or a string-keyed mapping does not type-check.

/// Borrow every element of an ordered collection, preserving order and length.
///
/// Works for anything whose shared reference iterates, e.g. `Vec<T>`, `[T]`,
/// `VecDeque<T>`.
///
/// A scalar is not a collection and is rejected by the compiler:
///
/// ```compile_fail
/// use flowplane_xdstest::xds::element_view;
///
/// let _ = element_view(&42u32);
/// ```
pub fn element_view<'a, C>(collection: &'a C) -> Vec<<&'a C as IntoIterator>::Item>
where
    C: ?Sized,
    &'a C: IntoIterator,
{
    collection.into_iter().collect()
}

/// Keys of a string-keyed mapping, sorted ascending.
///
/// The result does not depend on the mapping's iteration order, so a
/// `HashMap` and a `BTreeMap` with equal keys give equal output.
///
/// ```
/// use flowplane_xdstest::xds::sorted_keys;
/// use std::collections::HashMap;
///
/// let map: HashMap<&str, u8> = [("b", 1), ("a", 2)].into();
/// assert_eq!(sorted_keys(&map), vec!["a", "b"]);
/// ```
///
/// Mappings with non-string keys do not type-check:
///
/// ```compile_fail
/// use flowplane_xdstest::xds::sorted_keys;
/// use std::collections::HashMap;
///
/// let map: HashMap<u32, u8> = [(2, 1), (1, 2)].into();
/// let _ = sorted_keys(&map);
/// ```
pub fn sorted_keys<M, K, V>(mapping: M) -> Vec<String>
where
    M: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
{
    let mut keys: Vec<String> = mapping.into_iter().map(|(k, _)| k.as_ref().to_string()).collect();
    keys.sort();
    keys
}
