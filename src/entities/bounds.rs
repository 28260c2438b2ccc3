/// Axis-aligned bounding box in world pixels (origin top-left, y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test: boxes that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_rects_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(0.0, 0.0, 80.0, 80.0);
        let inner = Rect::new(36.0, 20.0, 8.0, 40.0);
        assert!(outer.intersects(&inner));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_intersection_is_symmetric(
                ax in -100.0f32..100.0, ay in -100.0f32..100.0,
                aw in 1.0f32..50.0, ah in 1.0f32..50.0,
                bx in -100.0f32..100.0, by in -100.0f32..100.0,
                bw in 1.0f32..50.0, bh in 1.0f32..50.0
            ) {
                let a = Rect::new(ax, ay, aw, ah);
                let b = Rect::new(bx, by, bw, bh);
                prop_assert_eq!(a.intersects(&b), b.intersects(&a));
            }

            #[test]
            fn test_rect_intersects_itself(
                x in -100.0f32..100.0, y in -100.0f32..100.0,
                w in 1.0f32..50.0, h in 1.0f32..50.0
            ) {
                let r = Rect::new(x, y, w, h);
                prop_assert!(r.intersects(&r));
            }
        }
    }
}
