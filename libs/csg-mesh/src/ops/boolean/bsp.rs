//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Operations
//!
//! - `build`: Insert polygons, splitting them across existing planes
//! - `clip_to`: Remove polygons from this tree that are inside another tree
//! - `invert`: Flip all polygons and swap front/back subtrees
//! - `into_polygons`: Move all polygons out of the tree
//!
//! ## Stack Safety
//!
//! All operations, including drop, use iterative algorithms with explicit
//! stacks. Tree depth grows with the polygon count of the input, so
//! recursion would overflow the stack on large meshes.

use super::plane::Plane;
use super::polygon::Polygon;

/// A node in the BSP tree.
///
/// A node without a plane is an empty leaf.
#[derive(Debug, Clone, Default)]
pub struct BspNode {
    /// Splitting plane (None for an empty tree)
    plane: Option<Plane>,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    /// Front subtree (polygons in front of plane)
    front: Option<Box<BspNode>>,
    /// Back subtree (polygons behind plane)
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Creates a new BSP tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut root = Self::default();
        root.build(polygons);
        root
    }

    /// Inserts polygons into the tree.
    ///
    /// Nodes without a plane take the plane of the first polygon they
    /// receive. Polygons spanning a node's plane are split.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(&mut BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            let Some(first) = polys.first() else {
                continue;
            };

            let BspNode {
                plane,
                polygons,
                front,
                back,
            } = node;
            let plane = *plane.get_or_insert(*first.plane());

            let estimated_size = polys.len() / 2 + 1;
            let mut front_polys = Vec::with_capacity(estimated_size);
            let mut back_polys = Vec::with_capacity(estimated_size);
            let mut coplanar_back = Vec::new();

            for poly in polys {
                poly.split(
                    &plane,
                    polygons,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }
            polygons.append(&mut coplanar_back);

            if !front_polys.is_empty() {
                stack.push((&mut **front.get_or_insert_with(Box::default), front_polys));
            }
            if !back_polys.is_empty() {
                stack.push((&mut **back.get_or_insert_with(Box::default), back_polys));
            }
        }
    }

    /// Inverts this BSP tree (flips all polygons and swaps subtrees).
    ///
    /// Converts the solid to its complement.
    pub fn invert(&mut self) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            let BspNode {
                plane,
                polygons,
                front,
                back,
            } = node;

            for poly in polygons.iter_mut() {
                poly.flip();
            }
            if let Some(plane) = plane {
                *plane = plane.flip();
            }
            std::mem::swap(front, back);

            if let Some(front) = front {
                stack.push(front);
            }
            if let Some(back) = back {
                stack.push(back);
            }
        }
    }

    /// Clips polygons to this BSP tree.
    ///
    /// Removes parts of polygons that are inside the solid represented
    /// by this tree.
    ///
    /// # Returns
    ///
    /// Polygons that are outside this tree's solid.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<(&BspNode, Vec<Polygon>)> = vec![(self, polygons)];

        while let Some((node, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let Some(plane) = node.plane else {
                result.extend(polys);
                continue;
            };

            let mut front_polys = Vec::new();
            let mut back_polys = Vec::new();
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();

            for poly in polys {
                poly.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front_polys,
                    &mut back_polys,
                );
            }
            front_polys.append(&mut coplanar_front);
            back_polys.append(&mut coplanar_back);

            match node.front.as_deref() {
                Some(front) => stack.push((front, front_polys)),
                None => result.extend(front_polys),
            }

            // Without a back subtree the back side is solid: discard
            if let Some(back) = node.back.as_deref() {
                stack.push((back, back_polys));
            }
        }

        result
    }

    /// Clips this tree's polygons to another tree.
    ///
    /// Removes parts of this tree's polygons that are inside the other tree.
    pub fn clip_to(&mut self, other: &BspNode) {
        let mut stack: Vec<&mut BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            let BspNode {
                polygons,
                front,
                back,
                ..
            } = node;

            *polygons = other.clip_polygons(std::mem::take(polygons));

            if let Some(front) = front {
                stack.push(front);
            }
            if let Some(back) = back {
                stack.push(back);
            }
        }
    }

    /// Collects all polygons from this tree.
    #[cfg(test)]
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            result.extend(node.polygons.iter().cloned());
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }

        result
    }

    /// Moves all polygons out of this tree, leaving it empty.
    pub fn into_polygons(mut self) -> Vec<Polygon> {
        let mut result = std::mem::take(&mut self.polygons);
        let mut stack: Vec<Box<BspNode>> = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            result.append(&mut node.polygons);
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }

        result
    }

    /// Returns the number of polygons in this tree.
    pub fn polygon_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&BspNode> = vec![self];

        while let Some(node) = stack.pop() {
            count += node.polygons.len();
            stack.extend(node.front.as_deref());
            stack.extend(node.back.as_deref());
        }

        count
    }

    /// Returns the depth of this tree.
    pub fn depth(&self) -> usize {
        if self.plane.is_none() {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack: Vec<(&BspNode, usize)> = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);

            if let Some(front) = node.front.as_deref() {
                stack.push((front, depth + 1));
            }
            if let Some(back) = node.back.as_deref() {
                stack.push((back, depth + 1));
            }
        }

        max_depth
    }
}

impl Drop for BspNode {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.front.take());
        stack.extend(self.back.take());

        while let Some(mut node) = stack.pop() {
            // Detach children so dropping `node` does not recurse
            stack.extend(node.front.take());
            stack.extend(node.back.take());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle_at(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspNode::new(vec![]);
        assert_eq!(tree.polygon_count(), 0);
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn test_bsp_new_multiple() {
        let tree = BspNode::new(vec![triangle_at(0.0), triangle_at(1.0), triangle_at(-1.0)]);
        assert_eq!(tree.polygon_count(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.all_polygons().len(), 3);
    }

    #[test]
    fn test_bsp_into_polygons() {
        let tree = BspNode::new(vec![triangle_at(0.0), triangle_at(1.0)]);
        assert_eq!(tree.into_polygons().len(), 2);
    }

    #[test]
    fn test_bsp_invert() {
        let poly = triangle_at(0.0);
        let original_normal = poly.plane().normal();

        let mut tree = BspNode::new(vec![poly]);
        tree.invert();

        let inverted_normal = tree.all_polygons()[0].plane().normal();
        assert!((original_normal + inverted_normal).length() < 1e-9);
    }

    #[test]
    fn test_bsp_clip_polygons_front() {
        let tree = BspNode::new(vec![triangle_at(0.0)]);
        let result = tree.clip_polygons(vec![triangle_at(1.0)]);
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_bsp_clip_polygons_back() {
        let tree = BspNode::new(vec![triangle_at(0.0)]);
        let result = tree.clip_polygons(vec![triangle_at(-1.0)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_bsp_clip_to_survives_empty_node() {
        // Clipping empties the root's polygons; the plane must still partition
        let mut a = BspNode::new(vec![triangle_at(-1.0)]);
        let b = BspNode::new(vec![triangle_at(0.0)]);
        a.clip_to(&b);
        assert_eq!(a.polygon_count(), 0);

        let result = a.clip_polygons(vec![triangle_at(-2.0)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_bsp_drop_deep_tree() {
        // A stack of parallel planes produces a degenerate, list-shaped tree
        let polys = (0..5_000).map(|i| triangle_at(i as f64)).collect();
        let tree = BspNode::new(polys);
        assert_eq!(tree.depth(), 5_000);
        drop(tree);
    }
}
