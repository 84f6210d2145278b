// meshpress-encoder/src/weld.rs
//! Content-based vertex welding
//!
//! Two source vertices collapse into one output vertex exactly when their
//! quantized encodings are identical in every present field. The key is a
//! tuple of the exact packed integers, compared field by field, so no two
//! structurally different encodings can ever collide the way concatenated
//! string keys could.

use std::collections::HashMap;

use crate::quantize::PackedPosition;

/// Dedup key: the packed position words plus the optional packed normal
/// and UV words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub position: PackedPosition,
    pub normal: Option<u32>,
    pub uv: Option<u32>,
}

/// Welds vertices in input order, preserving first-seen order as the dense
/// output index. Lookup is a hash map, so welding stays linear in the
/// vertex count.
#[derive(Debug, Default)]
pub struct VertexWelder {
    order: Vec<VertexKey>,
    seen: HashMap<VertexKey, u32>,
}

impl VertexWelder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the welded index for `key`, assigning the next dense index on
    /// first sight.
    pub fn insert(&mut self, key: VertexKey) -> u32 {
        if let Some(&index) = self.seen.get(&key) {
            return index;
        }
        let index = self.order.len() as u32;
        self.order.push(key);
        self.seen.insert(key, index);
        index
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Welded vertices in assignment order
    pub fn vertices(&self) -> &[VertexKey] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::pack_position;

    fn key(x: u32, normal: Option<u32>, uv: Option<u32>) -> VertexKey {
        VertexKey {
            position: pack_position(x, 0, 0),
            normal,
            uv,
        }
    }

    #[test]
    fn test_identical_keys_collapse() {
        let mut welder = VertexWelder::new();
        let a = welder.insert(key(1, Some(7), None));
        let b = welder.insert(key(1, Some(7), None));

        assert_eq!(a, b);
        assert_eq!(welder.len(), 1);
    }

    #[test]
    fn test_any_field_difference_separates() {
        let mut welder = VertexWelder::new();
        let base = welder.insert(key(1, Some(7), Some(9)));

        assert_ne!(welder.insert(key(2, Some(7), Some(9))), base);
        assert_ne!(welder.insert(key(1, Some(8), Some(9))), base);
        assert_ne!(welder.insert(key(1, Some(7), Some(10))), base);
        assert_ne!(welder.insert(key(1, None, Some(9))), base);
        assert_eq!(welder.len(), 5);
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let mut welder = VertexWelder::new();
        assert_eq!(welder.insert(key(5, None, None)), 0);
        assert_eq!(welder.insert(key(3, None, None)), 1);
        assert_eq!(welder.insert(key(5, None, None)), 0);
        assert_eq!(welder.insert(key(8, None, None)), 2);

        let xs: Vec<u32> = welder
            .vertices()
            .iter()
            .map(|k| crate::quantize::unpack_position(k.position)[0])
            .collect();
        assert_eq!(xs, vec![5, 3, 8]);
    }
}
