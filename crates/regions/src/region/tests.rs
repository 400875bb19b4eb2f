//! Region contract tests: containment, sections, simplex construction, polygons.

use std::collections::BTreeSet;
use std::sync::Arc;

use proptest::prelude::*;

use super::*;

fn r(min: i64, max: i64) -> IRange {
    IRange::new(min, max).unwrap()
}

/// All integer points of the bounding box accepted by `contains`.
fn points_by_contains(region: &Region) -> BTreeSet<Vec<i64>> {
    let mut out = BTreeSet::new();
    let ranges = region.coord_ranges().to_vec();
    let mut p: Vec<i64> = ranges.iter().map(|r| r.min()).collect();
    'outer: loop {
        if region.contains(&p).unwrap() {
            out.insert(p.clone());
        }
        for k in 0..p.len() {
            if p[k] < ranges[k].max() {
                p[k] += 1;
                continue 'outer;
            }
            p[k] = ranges[k].min();
        }
        break;
    }
    out
}

/// Points reached by cascaded sections, with multiplicity (to detect overlaps).
fn points_by_sections(region: &Region) -> Vec<Vec<i64>> {
    let mut out = Vec::new();
    collect_section_points(region, &mut Vec::new(), &mut out);
    out
}

fn collect_section_points(region: &Region, suffix: &mut Vec<i64>, out: &mut Vec<Vec<i64>>) {
    let n = region.n();
    if n == 1 {
        let range = region.coord_range(0);
        for x in range.min()..=range.max() {
            if region.is_rectangular() || region.contains(&[x]).unwrap() {
                let mut p = vec![x];
                p.extend(suffix.iter().rev());
                out.push(p);
            }
        }
        return;
    }
    let last = region.coord_range(n - 1);
    for v in last.min()..=last.max() {
        for section in region.section_at_last_coordinate(v).unwrap() {
            assert_eq!(section.n(), n - 1);
            suffix.push(v);
            collect_section_points(&section, suffix, out);
            suffix.pop();
        }
    }
}

fn segments(sections: &[Region]) -> Vec<(i64, i64)> {
    sections
        .iter()
        .map(|s| (s.coord_range(0).min(), s.coord_range(0).max()))
        .collect()
}

fn assert_round_trip(region: &Region) {
    let by_contains = points_by_contains(region);
    let by_sections = points_by_sections(region);
    let unique: BTreeSet<Vec<i64>> = by_sections.iter().cloned().collect();
    assert_eq!(unique.len(), by_sections.len(), "overlapping sections in {region}");
    assert_eq!(by_contains, unique, "round trip failed for {region}");
}

#[test]
fn box_sections_drop_last_range() {
    let b = Region::hyperparallelepiped(&[r(0, 4), r(-2, 3), r(5, 7)]).unwrap();
    for z in 5..=7 {
        for y in -2..=3 {
            let mut current = b.clone();
            for v in [z, y] {
                let s = current.section_at_last_coordinate(v).unwrap();
                assert_eq!(s.len(), 1);
                current = s.into_iter().next().unwrap();
            }
            assert_eq!(current.n(), 1);
            assert!(current.is_rectangular());
            assert_eq!(current.coord_range(0), r(0, 4), "sections at z={z}, y={y}");
        }
    }
}

#[test]
fn point_membership_rejects_short_coordinates_for_every_shape() {
    let rect = Hyperparallelepiped::new(&[r(5, 6), r(5, 6)]).unwrap();
    assert!(!PointMembership::contains(&rect, &[]));
    assert!(!PointMembership::contains(&rect, &[5]));
    assert!(PointMembership::contains(&rect, &[5, 6]));

    let convex = ConvexHyperpolyhedron::new(&[1.0, 0.0], &[3.0], &[r(0, 5), r(0, 5)]).unwrap();
    assert!(!PointMembership::contains(&convex, &[]));
    assert!(!PointMembership::contains(&convex, &[1]));
    assert!(PointMembership::contains(&convex, &[1, 1]));

    let tet =
        Region::tetrahedron_3d(0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0)
            .unwrap();
    let view = SectionView::new(Arc::new(tet), 1).unwrap();
    assert!(!PointMembership::contains(&view, &[0]));
    assert!(PointMembership::contains(&view, &[0, 0]));
    assert!(PointMembership::contains(&view, &[1, 2, 99]));
}

#[test]
fn sections_outside_last_range_are_empty_for_every_variant() {
    let regions = vec![
        Region::rectangle_2d(r(0, 5), r(0, 5)),
        Region::convex_hyperpolyhedron(&[1.0, 0.0], &[3.0], &[r(0, 5), r(0, 5)]).unwrap(),
        Region::triangle_2d(0.0, 0.0, 4.0, 0.0, 0.0, 4.0).unwrap(),
        Region::polygon_2d(&[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0]]).unwrap(),
    ];
    for region in &regions {
        let last = region.coord_range(region.n() - 1);
        assert!(region.section_at_last_coordinate(last.max() + 1).unwrap().is_empty());
        assert!(region.section_at_last_coordinate(last.min() - 1).unwrap().is_empty());
        assert!(region.section_by_containment(last.max() + 1).map_or(true, |s| s.is_empty()));
    }
}

#[test]
fn one_dimensional_section_is_invalid_state() {
    let seg = Region::segment(r(0, 3));
    assert!(matches!(
        seg.section_at_last_coordinate(1),
        Err(RegionError::InvalidState { .. })
    ));
    let simplex1 = Region::simplex(&[vec![0.0], vec![3.0]]).unwrap();
    assert!(matches!(
        simplex1.section_at_last_coordinate(1),
        Err(RegionError::InvalidState { .. })
    ));
    assert!(matches!(
        SectionView::new(Arc::new(seg), 0),
        Err(RegionError::InvalidState { .. })
    ));
}

#[test]
fn triangle_scenario() {
    let t = Region::triangle_2d(0.0, 0.0, 4.0, 0.0, 0.0, 4.0).unwrap();
    assert_eq!(segments(&t.section_at_last_coordinate(1).unwrap()), vec![(0, 3)]);
    assert_eq!(segments(&t.section_at_last_coordinate(4).unwrap()), vec![(0, 0)]);
    assert!(t.section_at_last_coordinate(5).unwrap().is_empty());
    assert!(t.section_at_last_coordinate(-1).unwrap().is_empty());
    assert!(t.contains(&[1, 3]).unwrap());
    assert!(!t.contains(&[2, 3]).unwrap());
}

#[test]
fn collinear_vertices_are_degenerate() {
    let err = Region::triangle_2d(0.0, 0.0, 2.0, 0.0, 4.0, 0.0).unwrap_err();
    assert!(matches!(err, RegionError::DegenerateSimplex { .. }));
    assert!(is_simplex_degenerated(&[vec![0.0, 0.0], vec![2.0, 0.0], vec![4.0, 0.0]]).unwrap());
    assert!(!is_simplex_degenerated(&[vec![0.0, 0.0], vec![4.0, 0.0], vec![0.0, 4.0]]).unwrap());
    // coplanar tetrahedron
    let flat = Region::tetrahedron_3d(
        0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0,
    );
    assert!(matches!(flat, Err(RegionError::DegenerateSimplex { .. })));
}

#[test]
fn simplex_is_invariant_to_vertex_permutation() {
    let vs = vec![vec![0.5, -1.0, 0.0], vec![4.0, 0.0, 1.0], vec![0.0, 3.5, 0.0], vec![1.0, 1.0, 4.0]];
    let reference = points_by_contains(&Region::simplex(&vs).unwrap());
    assert!(!reference.is_empty());
    for perm in [[1, 0, 2, 3], [3, 2, 1, 0], [2, 3, 0, 1], [0, 3, 1, 2]] {
        let permuted: Vec<Vec<f64>> = perm.iter().map(|&i| vs[i].clone()).collect();
        let s = Region::simplex(&permuted).unwrap();
        assert_eq!(points_by_contains(&s), reference);
    }
}

#[test]
fn polygon_square_matches_box() {
    let p = Region::polygon_2d(&[[0.0, 0.0], [5.0, 0.0], [5.0, 5.0], [0.0, 5.0]]).unwrap();
    let b = Region::rectangle_2d(r(0, 5), r(0, 5));
    for y in 0..=5 {
        let expected = segments(&b.section_at_last_coordinate(y).unwrap());
        let got = segments(&p.section_at_last_coordinate(y).unwrap());
        let covered: BTreeSet<i64> = got.iter().flat_map(|&(lo, hi)| lo..=hi).collect();
        assert_eq!(covered, (0..=5).collect::<BTreeSet<_>>());
        if (1..5).contains(&y) {
            assert_eq!(got, expected);
        }
    }
}

#[test]
fn convex_single_inequality_scenario() {
    let c = Region::convex_hyperpolyhedron(&[1.0, 0.0], &[3.0], &[r(0, 5), r(0, 5)]).unwrap();
    for y in 0..=5 {
        assert_eq!(segments(&c.section_at_last_coordinate(y).unwrap()), vec![(0, 3)]);
        assert!(c.section_is_uninterrupted_segment(y));
        assert_eq!(c.segment_section_at_last_coordinate(y), Some((0, 3)));
    }
    assert!(!c.section_is_uninterrupted_segment(6));
}

#[test]
fn polygon_contains_is_unsupported() {
    let p = Region::polygon_2d(&[[0.0, 0.0], [5.0, 0.0], [0.0, 5.0]]).unwrap();
    assert!(!p.is_contains_supported());
    assert!(matches!(p.contains(&[0, 0]), Err(RegionError::Unsupported { .. })));
    assert!(matches!(
        p.section_by_containment(1),
        Err(RegionError::Unsupported { .. })
    ));
    assert!(!p.section_is_uninterrupted_segment(1));
    assert_eq!(p.segment_section_at_last_coordinate(1), None);
}

#[test]
fn contains_rejects_short_coordinates_and_ignores_extra() {
    let b = Region::rectangle_2d(r(0, 2), r(0, 2));
    assert!(matches!(b.contains(&[1]), Err(RegionError::InvalidArgument { .. })));
    assert!(b.contains(&[1, 1, 99]).unwrap());
}

#[test]
fn round_trip_box_convex_simplex() {
    assert_round_trip(&Region::parallelepiped_3d(r(-1, 2), r(0, 3), r(2, 4)));
    assert_round_trip(
        &Region::convex_hyperpolyhedron(
            &[1.0, 1.0, 1.0, -1.0, 0.5, 0.0],
            &[5.0, 1.0],
            &[r(0, 5), r(0, 5), r(0, 5)],
        )
        .unwrap(),
    );
    assert_round_trip(&Region::tetrahedron_3d(
        0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 5.0,
    )
    .unwrap());
    assert_round_trip(&Region::triangle_2d(-2.5, 0.3, 6.1, 2.0, 1.0, 7.7).unwrap());
}

#[test]
fn containment_section_agrees_with_fast_section() {
    let t = Region::triangle_2d(0.0, 0.0, 7.0, 1.0, 2.0, 6.0).unwrap();
    for y in 0..=6 {
        let fast: BTreeSet<i64> = segments(&t.section_at_last_coordinate(y).unwrap())
            .into_iter()
            .flat_map(|(lo, hi)| lo..=hi)
            .collect();
        let slow = t.section_by_containment(y).unwrap();
        assert_eq!(slow.len(), 1);
        let view = &slow[0];
        assert!(!view.is_rectangular());
        assert!(matches!(view, Region::Section(s) if s.value() == y));
        let range = view.coord_range(0);
        let slow_points: BTreeSet<i64> = (range.min()..=range.max())
            .filter(|&x| view.contains(&[x]).unwrap())
            .collect();
        assert_eq!(fast, slow_points);
    }
}

#[test]
fn section_of_section_view_uses_containment() {
    let tet =
        Region::tetrahedron_3d(0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0)
            .unwrap();
    let view: Region = SectionView::new(Arc::new(tet.clone()), 1).unwrap().into();
    assert_eq!(view.n(), 2);
    assert_round_trip(&view);
    // z = 1, y = 2 → x + 3 <= 4
    let line = view.section_at_last_coordinate(2).unwrap();
    assert_eq!(line.len(), 1);
    let pts: Vec<i64> = (0..=4).filter(|&x| line[0].contains(&[x]).unwrap()).collect();
    assert_eq!(pts, vec![0, 1]);
}

#[test]
fn display_strings() {
    assert_eq!(
        Region::rectangle_2d(r(0, 5), r(1, 3)).to_string(),
        "2-dimensional rectangular region 0..5x1..3"
    );
    assert_eq!(
        Region::triangle_2d(0.0, 0.0, 4.0, 0.0, 0.0, 4.5).unwrap().to_string(),
        "2-dimensional simplex (triangle) with vertices (0,0), (4,0), (0,4.5)"
    );
    assert_eq!(
        Region::convex_hyperpolyhedron(&[1.0, 0.0], &[3.0], &[r(0, 5), r(0, 5)])
            .unwrap()
            .to_string(),
        "2-dimensional convex hyperpolyhedral region (inside 0..5x0..5)"
    );
    let t = Region::triangle_2d(0.0, 0.0, 4.0, 0.0, 0.0, 4.0).unwrap();
    let s = t.section_by_containment(2).unwrap();
    assert!(s[0].to_string().starts_with("section at 2 of 2-dimensional simplex"));
}

#[test]
fn simplex_bounding_ranges_round_outward() {
    let t = Region::triangle_2d(-0.5, 0.2, 3.7, 0.0, 1.0, 2.1).unwrap();
    assert_eq!(t.coord_ranges(), &[r(-1, 4), r(0, 3)]);
    let c = t.as_convex_hyperpolyhedron().unwrap();
    assert!(c.is_simplex());
    assert_eq!(c.vertices().unwrap()[2], vec![1.0, 2.1]);
    // sections of a simplex are plain hyperpolyhedra or segments
    let tet =
        Region::tetrahedron_3d(0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 4.0)
            .unwrap();
    let s = tet.section_at_last_coordinate(1).unwrap();
    assert!(!s[0].as_convex_hyperpolyhedron().unwrap().is_simplex());
}

#[test]
fn factory_validation() {
    assert!(Region::hyperparallelepiped(&[]).is_err());
    assert!(Region::simplex(&[]).is_err());
    assert!(Region::simplex(&[vec![0.0, 0.0], vec![1.0], vec![0.0, 1.0]]).is_err());
    assert!(Region::simplex(&[vec![], vec![]]).is_err());
    assert!(Region::polygon_2d(&[]).is_err());
}

#[test]
fn is_inside_matrix_respects_back_shifts() {
    let b = Region::rectangle_2d(r(2, 4), r(0, 1));
    let h = b.as_hyperparallelepiped().unwrap();
    assert!(h.is_inside_matrix(&[5, 2], &[]));
    assert!(!h.is_inside_matrix(&[4, 2], &[]));
    assert!(h.is_inside_matrix(&[3, 2], &[2]));
    assert!(!h.is_inside_matrix(&[5, 2], &[3]));
    assert!(!h.is_inside_matrix(&[5, 2], &[i64::MIN]));
    // missing dims count as 1
    assert!(!h.is_inside_matrix(&[5], &[]));
}

proptest! {
    #[test]
    fn box_contains_iff_every_axis_contains(
        bounds in prop::collection::vec((-20i64..20, 0i64..10), 1..4),
        point in prop::collection::vec(-25i64..35, 4),
    ) {
        let ranges: Vec<IRange> = bounds.iter().map(|&(lo, len)| r(lo, lo + len)).collect();
        let b = Region::hyperparallelepiped(&ranges).unwrap();
        let expected = ranges.iter().zip(&point).all(|(r, &x)| r.contains(x));
        prop_assert_eq!(b.contains(&point).unwrap(), expected);
    }

    #[test]
    fn triangle_sections_match_containment(
        v in prop::collection::vec((-6i32..7, -6i32..7), 3),
    ) {
        let vs: Vec<Vec<f64>> = v.iter().map(|&(x, y)| vec![x as f64, y as f64]).collect();
        prop_assume!(!is_simplex_degenerated(&vs).unwrap());
        let t = Region::simplex(&vs).unwrap();
        assert_round_trip(&t);
    }

    #[test]
    fn triangle_polygon_covers_same_points_as_simplex(
        v in prop::collection::vec((-6i32..7, -6i32..7), 3),
    ) {
        let vs: Vec<Vec<f64>> = v.iter().map(|&(x, y)| vec![x as f64, y as f64]).collect();
        prop_assume!(!is_simplex_degenerated(&vs).unwrap());
        let t = Region::simplex(&vs).unwrap();
        let p = Region::polygon_2d(&[
            [vs[0][0], vs[0][1]],
            [vs[1][0], vs[1][1]],
            [vs[2][0], vs[2][1]],
        ])
        .unwrap();
        prop_assert_eq!(t.coord_ranges(), p.coord_ranges());
        let y_range = t.coord_range(1);
        for y in y_range.min()..=y_range.max() {
            let from_simplex: BTreeSet<i64> = segments(&t.section_at_last_coordinate(y).unwrap())
                .into_iter()
                .flat_map(|(lo, hi)| lo..=hi)
                .collect();
            let from_polygon: BTreeSet<i64> = segments(&p.section_at_last_coordinate(y).unwrap())
                .into_iter()
                .flat_map(|(lo, hi)| lo..=hi)
                .collect();
            prop_assert_eq!(from_simplex, from_polygon);
        }
    }
}
