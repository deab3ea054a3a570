//! Intersection of a triangle with a contour level.
//!
//! A plane cuts a triangle in at most one straight line, so each
//! triangle/level pair yields zero or one [`Segment`]. The cases follow the
//! CONREC case table:
//!
//! | on-plane vertices | other vertices       | result                              |
//! |-------------------|----------------------|-------------------------------------|
//! | 0                 | all on one side      | none                                |
//! | 0                 | straddle             | two interpolated edge points        |
//! | 1                 | straddle             | the vertex and the opposite edge    |
//! | 1                 | same side (touching) | none                                |
//! | 2                 | -                    | the edge between the two vertices   |
//! | 3                 | -                    | last-to-first edge, or none when `ignore_on_plane` |

use crate::contour::{ContourOptions, Point, Segment};
use crate::triangle::{Side, Triangle, Vertex};

/// Linear interpolation of the point on edge `p1 → p2` where the value equals `level`.
///
/// `p1.z` and `p2.z` must differ.
#[inline]
pub fn interpolate_point(p1: &Vertex, p2: &Vertex, level: f64) -> Point {
    let t = (level - p1.z) / (p2.z - p1.z);
    Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y))
}

/// Intersect `triangle` with the plane `z = level`.
pub fn intersect(triangle: &Triangle, level: f64, options: &ContourOptions) -> Option<Segment> {
    let sides = triangle.classify(level, options.on_plane_tolerance);
    if sides.contains(&Side::Invalid) {
        return None;
    }

    let v = &triangle.vertices;
    let on_plane = sides.iter().filter(|s| **s == Side::OnPlane).count();

    match on_plane {
        3 => {
            if options.ignore_on_plane {
                None
            } else {
                Some(Segment::new(v[2].xy(), v[0].xy()))
            }
        }
        2 => {
            let off = sides.iter().position(|s| *s != Side::OnPlane)?;
            Some(Segment::new(v[(off + 1) % 3].xy(), v[(off + 2) % 3].xy()))
        }
        1 => {
            let k = sides.iter().position(|s| *s == Side::OnPlane)?;
            let a = (k + 1) % 3;
            let b = (k + 2) % 3;
            if sides[a] == sides[b] {
                // touches the plane at a single vertex
                return None;
            }
            Some(Segment::new(v[k].xy(), interpolate_point(&v[a], &v[b], level)))
        }
        _ => {
            if sides[0] == sides[1] && sides[1] == sides[2] {
                return None;
            }

            // the vertex on its own side of the plane
            let k = if sides[0] == sides[1] {
                2
            } else if sides[0] == sides[2] {
                1
            } else {
                0
            };
            let prev = (k + 2) % 3;
            let next = (k + 1) % 3;

            Some(Segment::new(
                interpolate_point(&v[prev], &v[k], level),
                interpolate_point(&v[k], &v[next], level),
            ))
        }
    }
}
