//! Deep merge of keyed-tree mappings
//!
//! `merge(dst, src)` layers `src` on top of `dst`. For each key in `src`:
//!
//! - absent from `dst`: the `src` value is copied as-is
//! - both mappings: merged recursively
//! - both sequences: `dst` elements followed by `src` elements, no dedup
//! - anything else: the `src` value replaces the `dst` value
//!
//! Keys only present in `dst` are left untouched. The operation is not
//! commutative; application order is part of the result.

use crate::document::{Mapping, Value};
use std::collections::btree_map::Entry;

/// Merge `src` on top of `dst`, returning the combined mapping.
pub fn merge(dst: Mapping, src: Mapping) -> Mapping {
    let mut dst = dst;
    merge_into(&mut dst, src);
    dst
}

/// In-place form of [`merge`]; `dst` is the accumulator.
pub fn merge_into(dst: &mut Mapping, src: Mapping) {
    for (key, src_val) in src {
        match dst.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(src_val);
            }
            Entry::Occupied(mut slot) => merge_value(slot.get_mut(), src_val),
        }
    }
}

fn merge_value(dst: &mut Value, src: Value) {
    match (dst, src) {
        (Value::Mapping(dst_map), Value::Mapping(src_map)) => merge_into(dst_map, src_map),
        (Value::Sequence(dst_seq), Value::Sequence(src_seq)) => dst_seq.extend(src_seq),
        (dst, src) => *dst = src,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use pretty_assertions::assert_eq;

    fn map(yaml: &str) -> Mapping {
        Document::parse(yaml).unwrap().into_mapping()
    }

    #[test]
    fn scalars_are_overridden_by_src() {
        assert_eq!(merge(map("a: 1"), map("a: 2")), map("a: 2"));
        assert_eq!(merge(map("a: 2"), map("a: 1")), map("a: 1"));
    }

    #[test]
    fn sequences_append() {
        assert_eq!(merge(map("l: [1, 2]"), map("l: [3]")), map("l: [1, 2, 3]"));
    }

    #[test]
    fn sequences_keep_duplicates() {
        assert_eq!(merge(map("l: [a, b]"), map("l: [b, a]")), map("l: [a, b, b, a]"));
    }

    #[test]
    fn mappings_merge_recursively() {
        assert_eq!(
            merge(map("a: {x: 1, y: 2}"), map("a: {y: 9, z: 3}")),
            map("a: {x: 1, y: 9, z: 3}")
        );
    }

    #[test]
    fn type_mismatch_src_wins() {
        assert_eq!(merge(map("a: [1, 2]"), map("a: x")), map("a: x"));
        assert_eq!(merge(map("a: {k: v}"), map("a: [1]")), map("a: [1]"));
        assert_eq!(merge(map("a: null"), map("a: {k: v}")), map("a: {k: v}"));
    }

    #[test]
    fn dst_only_keys_survive() {
        assert_eq!(
            merge(map("keep: 1\nboth: 1"), map("both: 2\nnew: 3")),
            map("keep: 1\nboth: 2\nnew: 3")
        );
    }

    #[test]
    fn deep_nesting_is_unbounded() {
        let dst = map("a: {b: {c: {d: {e: [1], f: keep}}}}");
        let src = map("a: {b: {c: {d: {e: [2], g: added}}}}");
        assert_eq!(
            merge(dst, src),
            map("a: {b: {c: {d: {e: [1, 2], f: keep, g: added}}}}")
        );
    }

    #[test]
    fn empty_src_is_identity() {
        let dst = map("services: {web: {image: nginx}}");
        assert_eq!(merge(dst.clone(), Mapping::new()), dst);
    }
}
