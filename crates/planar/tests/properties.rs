//! Property tests over random inputs.
//!
//! Integer coordinates are used wherever a property needs exact predicates,
//! drawn both small and across the type's whole range; float coordinates
//! where the tolerance kernel itself is under test.

use planar::prelude::*;
use planar::scalar;
use proptest::prelude::*;
use std::cmp::Ordering;

fn int_point() -> impl Strategy<Value = Point2<i32>> {
    (-1000i32..1000, -1000i32..1000).prop_map(|(x, y)| Point2::new(x, y))
}

fn wide_i32() -> impl Strategy<Value = Point2<i32>> {
    (i32::MIN..i32::MAX, i32::MIN..i32::MAX).prop_map(|(x, y)| Point2::new(x, y))
}

fn wide_i64() -> impl Strategy<Value = Point2<i64>> {
    const R: i64 = 1 << 61;
    (-R..R, -R..R).prop_map(|(x, y)| Point2::new(x, y))
}

fn any_int_point() -> impl Strategy<Value = Point2<i32>> {
    prop_oneof![int_point(), wide_i32()]
}

/// Three points on one line through large coordinates, the last nudged off
/// it by at most one unit.
fn near_collinear() -> impl Strategy<Value = [Point2<i32>; 3]> {
    const R: i32 = 1 << 29;
    const S: i32 = 1 << 14;
    (-R..R, -R..R, -S..S, -S..S, -S..S, -S..S, -1i32..=1).prop_map(
        |(x, y, dx, dy, k1, k2, nudge)| {
            [
                Point2::new(x, y),
                Point2::new(x + dx * k1, y + dy * k1),
                Point2::new(x + dx * k2, y + dy * k2 + nudge),
            ]
        },
    )
}

/// Cross product in `i128`, exact for both strategies above.
fn reference_turn<T: Scalar + Into<i128>>(p0: &Point2<T>, p1: &Point2<T>, p2: &Point2<T>) -> Turn {
    let w = |v: T| -> i128 { v.into() };
    let cross = (w(p1.x()) - w(p0.x())) * (w(p2.y()) - w(p0.y()))
        - (w(p1.y()) - w(p0.y())) * (w(p2.x()) - w(p0.x()));
    match cross.cmp(&0) {
        Ordering::Greater => Turn::Left,
        Ordering::Equal => Turn::Collinear,
        Ordering::Less => Turn::Right,
    }
}

fn float_point() -> impl Strategy<Value = Point2<f64>> {
    (-1e3f64..1e3, -1e3f64..1e3).prop_map(|(x, y)| Point2::new(x, y))
}

fn int_rect() -> impl Strategy<Value = Rect<i32>> {
    (int_point(), 0i32..500, 0i32..500).prop_map(|(p, w, h)| Rect::from_corner(p, w, h))
}

proptest! {
    #[test]
    fn kernel_is_symmetric_and_trichotomous(a in -1e6f64..1e6, b in -1e6f64..1e6, nudge in -1e-9f64..1e-9) {
        for (x, y) in [(a, b), (a, a + nudge), (a, a * (1.0 + 1e-14))] {
            prop_assert_eq!(scalar::equal(x, y), scalar::equal(y, x));
            let hits = [scalar::less_than(x, y), scalar::equal(x, y), scalar::greater_than(x, y)]
                .iter()
                .filter(|&&h| h)
                .count();
            prop_assert_eq!(hits, 1);
        }
    }

    #[test]
    fn hull_is_idempotent(pts in prop::collection::vec(float_point(), 3..40)) {
        if let Some(h) = convex_hull(&pts) {
            let again = convex_hull(&h.vertices).expect("a hull's vertices have a hull");
            prop_assert_eq!(&again.vertices, &h.vertices);
            prop_assert_eq!(again.bounding_box, h.bounding_box);
        }
    }

    #[test]
    fn hull_contains_every_input_point(pts in prop::collection::vec(any_int_point(), 3..40)) {
        let poly = Polygon::from_points(pts.iter().copied());
        if !poly.is_null() {
            let v = poly.vertices();
            for i in 0..v.len() {
                let (a, b, c) = (&v[i], &v[(i + 1) % v.len()], &v[(i + 2) % v.len()]);
                prop_assert_eq!(turn(a, b, c), Turn::Left);
            }
            for p in &pts {
                prop_assert_eq!(overlap(p, &poly), *p, "{} not in {}", p, poly);
            }
        }
    }

    #[test]
    fn bounding_box_bounds_the_input(pts in prop::collection::vec(any_int_point(), 3..40)) {
        let poly = Polygon::from_points(pts.iter().copied());
        if !poly.is_null() {
            prop_assert_eq!(poly.bounding_box(), Rect::bounding(&pts));
        }
    }

    #[test]
    fn integer_turns_match_exact_cross_product(
        a in wide_i32(), b in wide_i32(), c in wide_i32(),
        d in wide_i64(), e in wide_i64(), f in wide_i64(),
        line in near_collinear(),
    ) {
        prop_assert_eq!(turn(&a, &b, &c), reference_turn(&a, &b, &c));
        prop_assert_eq!(turn(&d, &e, &f), reference_turn(&d, &e, &f));
        let [p, q, r] = line;
        prop_assert_eq!(turn(&p, &q, &r), reference_turn(&p, &q, &r));
        prop_assert_eq!(turn(&q, &r, &p), reference_turn(&q, &r, &p));
    }

    #[test]
    fn full_range_integer_shapes_never_wrap(
        a in wide_i32(), b in wide_i32(), c in wide_i32(), d in wide_i32(),
        dx in any::<i32>(), dy in any::<i32>(),
    ) {
        let s = Segment2::through(a, b);
        prop_assert_eq!(s.is_null(), a == b);
        let t = Segment2::through(c, d);
        let r = Rect::bounding(&[a, b, c]);
        let poly = Polygon::from_points([a, b, c, d]);
        let _ = (s.width(), s.height(), s.direction(), s.midpoint(), s.slope());
        let _ = (r.width(), r.height(), r.area(), r.perimeter());
        let _ = (overlap(&s, &t), overlap(&s, &r), overlap(&a, &poly));
        let _ = (overlap(&Line2::through(c, d), &poly), poly.area(), poly.centroid());
        let _ = orientation(&a, &b, &c);
        if r.width() != i32::sentinel() {
            prop_assert_eq!(i64::from(r.width()), i64::from(r.right()) - i64::from(r.left()));
        }

        let moved = translate(&a, dx, dy);
        let fits = a.x().checked_add(dx).zip(a.y().checked_add(dy));
        let expect_null = !matches!(fits, Some((x, y)) if x != i32::MAX && y != i32::MAX);
        prop_assert_eq!(moved.is_null(), expect_null);
    }

    #[test]
    fn null_absorbs_every_overlap(p in float_point(), q in float_point(), r in float_point()) {
        let line = Line2::through(p, q);
        let seg = Segment2::through(p, q);
        let rect = Rect::bounding(&[p, q]);
        let poly = Polygon::from_points([p, q, r]);
        let np = Point2::<f64>::null();
        prop_assert!(overlap(&np, &p).is_null());
        prop_assert!(overlap(&np, &line).is_null());
        prop_assert!(overlap(&np, &poly).is_null());
        prop_assert!(overlap(&Line2::<f64>::null(), &line).is_null());
        prop_assert!(overlap(&seg, &Segment2::<f64>::null()).is_null());
        prop_assert!(overlap(&Line2::<f64>::null(), &rect).is_null());
        prop_assert!(overlap(&seg, &Rect::<f64>::null()).is_null());
        prop_assert!(overlap(&Rect::<f64>::null(), &rect).is_null());
        prop_assert!(overlap(&Segment2::<f64>::null(), &poly).is_null());
        prop_assert!(overlap(&p, &Polygon::<f64>::null()).is_null());
    }

    #[test]
    fn translate_round_trips_exactly(pts in prop::collection::vec(int_point(), 3..20), dx in -500i32..500, dy in -500i32..500) {
        let poly = Polygon::from_points(pts);
        prop_assert_eq!(translate(&translate(&poly, dx, dy), -dx, -dy), poly);
    }

    #[test]
    fn rect_overlap_commutes_and_is_contained(a in int_rect(), b in int_rect()) {
        let ab = overlap(&a, &b);
        prop_assert_eq!(ab, overlap(&b, &a));
        if !ab.is_null() {
            prop_assert!(ab.width() > 0 && ab.height() > 0);
            for c in ab.corners() {
                prop_assert!(a.contains(&c) && b.contains(&c));
            }
        }
    }

    #[test]
    fn segment_crossing_lies_on_both(a in int_point(), b in int_point(), c in int_point(), d in int_point()) {
        let s = Segment2::through(a, b);
        let t = Segment2::through(c, d);
        let x = overlap(&s, &t);
        if !x.is_null() {
            prop_assert!(Rect::bounding(&[a, b]).contains(&x));
            prop_assert!(Rect::bounding(&[c, d]).contains(&x));
        }
    }

    #[test]
    fn point_in_rect_matches_contains(p in int_point(), r in int_rect()) {
        prop_assert_eq!(overlap(&p, &r).is_null(), !r.contains(&p));
    }
}
