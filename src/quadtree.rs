/*
 * Quadtree Module
 *
 * A region quadtree used as the broad phase for neighbor lookups. The tree is
 * rebuilt from scratch every tick: points are inserted during the build phase
 * and the tree is only read afterwards.
 *
 * Nodes live in a flat arena (`Vec<QuadNode>`) and refer to their children by
 * index, so the tree has a single owner and traversal never recurses for
 * searches.
 *
 * Splitting rules:
 * - A node keeps up to 4 points as a leaf and is marked full on the 4th.
 * - The next insertion into a full node pushes every local point down into
 *   the child quadrant that contains it and empties the node's own list.
 * - Nodes narrower than the minimum cell width never split, and neither do
 *   nodes at the maximum depth (coincident points with a zero minimum width).
 */

use crate::vector::Vector2;

pub type NodeId = usize;

const ROOT: NodeId = 0;

// Number of points a node holds before it is marked full
pub const SPLIT_THRESHOLD: usize = 4;

// Nodes this deep are leaves whatever their width
pub const MAX_DEPTH: usize = 32;

/// An entry in the tree. `data` is the index of the boid the point stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub position: Vector2,
    pub data: Option<usize>,
}

impl Point {
    pub fn new(position: Vector2, data: Option<usize>) -> Self {
        Self { position, data }
    }
}

/// Axis-aligned rectangle in screen-style coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub origin: Vector2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(origin: Vector2, width: f32, height: f32) -> Self {
        Self { origin, width, height }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.height
    }

    /// Overlap test against the square `[c - r, c + r]²` enclosing a query circle.
    #[inline]
    pub fn overlaps_square(&self, center: Vector2, radius: f32) -> bool {
        !(self.right() < center.x - radius
            || center.x + radius < self.left()
            || self.bottom() < center.y - radius
            || center.y + radius < self.top())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    TopLeft = 0,
    TopRight = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    /// Test order. A point on a shared edge goes to the first quadrant that accepts it.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];
}

#[derive(Debug, Clone)]
pub struct QuadNode {
    rect: Rect,
    points: Vec<Point>,
    children: [Option<NodeId>; 4],
    is_full: bool,
}

impl QuadNode {
    fn new(rect: Rect) -> Self {
        Self {
            rect,
            points: Vec::with_capacity(SPLIT_THRESHOLD + 1),
            children: [None; 4],
            is_full: false,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn child(&self, quadrant: Quadrant) -> Option<NodeId> {
        self.children[quadrant as usize]
    }

    pub fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    pub fn is_full(&self) -> bool {
        self.is_full
    }

    /// Inclusive membership test for one child quadrant of this node.
    pub fn in_quadrant(&self, quadrant: Quadrant, position: Vector2) -> bool {
        let child = self.child_rect(quadrant);
        position.x >= child.left()
            && position.y >= child.top()
            && position.x <= child.right()
            && position.y <= child.bottom()
    }

    /// Picks the child quadrant for `position`.
    ///
    /// Positions outside the node (boids that drifted off screen) fall back to
    /// the quadrant on their side of the node center, so no point is dropped.
    pub fn quadrant_of(&self, position: Vector2) -> Quadrant {
        if let Some(quadrant) = Quadrant::ALL
            .into_iter()
            .find(|&q| self.in_quadrant(q, position))
        {
            return quadrant;
        }

        let center_x = self.rect.origin.x + self.rect.width / 2.0;
        let center_y = self.rect.origin.y + self.rect.height / 2.0;
        match (position.x <= center_x, position.y <= center_y) {
            (true, true) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }

    fn child_rect(&self, quadrant: Quadrant) -> Rect {
        let half_width = self.rect.width / 2.0;
        let half_height = self.rect.height / 2.0;
        let Vector2 { x, y } = self.rect.origin;
        let origin = match quadrant {
            Quadrant::TopLeft => Vector2::new(x, y),
            Quadrant::TopRight => Vector2::new(x + half_width, y),
            Quadrant::BottomLeft => Vector2::new(x, y + half_height),
            Quadrant::BottomRight => Vector2::new(x + half_width, y + half_height),
        };
        Rect::new(origin, half_width, half_height)
    }
}

pub struct QuadTree {
    nodes: Vec<QuadNode>,
    min_width: f32,
    len: usize,
}

impl QuadTree {
    pub fn new(bounds: Rect, min_width: f32) -> Self {
        Self {
            nodes: vec![QuadNode::new(bounds)],
            min_width,
            len: 0,
        }
    }

    pub fn root(&self) -> &QuadNode {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &QuadNode {
        &self.nodes[id]
    }

    /// Number of points inserted so far.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| !node.has_children()).count()
    }

    // Rectangles of every node, for drawing the partition
    pub fn node_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.nodes.iter().map(|node| node.rect)
    }

    pub fn insert_point(&mut self, point: Point) {
        self.len += 1;
        self.insert_at(ROOT, 0, point);
    }

    fn insert_at(&mut self, id: NodeId, depth: usize, point: Point) {
        let min_width = self.min_width;
        let node = &mut self.nodes[id];
        node.points.push(point);

        // Leaves at the finest resolution grow without bound
        if node.rect.width < min_width || depth >= MAX_DEPTH {
            return;
        }

        if !node.is_full {
            if node.points.len() == SPLIT_THRESHOLD {
                node.is_full = true;
            }
            return;
        }

        // Full node: push everything held locally down one level
        let pending = std::mem::take(&mut node.points);
        for point in pending {
            let child = self.child_for(id, point.position);
            self.insert_at(child, depth + 1, point);
        }
    }

    // Get or lazily create the child of `id` that should hold `position`
    fn child_for(&mut self, id: NodeId, position: Vector2) -> NodeId {
        let node = &self.nodes[id];
        let quadrant = node.quadrant_of(position);
        if let Some(child) = node.child(quadrant) {
            return child;
        }

        let rect = node.child_rect(quadrant);
        let child = self.nodes.len();
        self.nodes.push(QuadNode::new(rect));
        self.nodes[id].children[quadrant as usize] = Some(child);
        child
    }

    /// Broad-phase search: every point in leaves overlapping the square around `center`.
    ///
    /// Results are a superset of the points inside the circle; callers filter
    /// by exact distance. An empty tree yields an empty result.
    pub fn search_area(&self, center: Vector2, radius: f32) -> Vec<Point> {
        let mut found = Vec::new();
        self.search_area_into(center, radius, &mut found);
        found
    }

    pub fn search_area_into(&self, center: Vector2, radius: f32, found: &mut Vec<Point>) {
        let mut stack = vec![ROOT];

        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if !node.rect.overlaps_square(center, radius) {
                continue;
            }

            if !node.points.is_empty() {
                found.extend_from_slice(&node.points);
                continue;
            }

            // Reverse so children are visited top-left first
            stack.extend(node.children.iter().rev().flatten().copied());
        }
    }
}
