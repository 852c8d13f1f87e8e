//! Canonical grids used in tests and benchmarks.
//!
//! - `hex_patch`: one hexagon and its six neighbors, unit center spacing.
//! - `hex_patch_at`: the same patch around a chosen center.
//! - `periodic_hex`: doubly periodic hexagonal plane.
//! - `icosphere`: Voronoi dual of a subdivided icosahedron on the unit sphere.
//! - `shuffle_vertices`: renumber vertices of any input (seeded).
//!
//! All builders return raw `GridInput` with incidence padded to the vertex
//! degree, exactly as a file reader would hand it over.

use std::collections::{BTreeMap, HashMap};
use std::f64::consts::{FRAC_PI_6, PI};

use nalgebra::Vector3;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::io::input::{GridInput, InputMeta};

fn planar_input(
    cells: Vec<Vector3<f64>>,
    vertices: Vec<Vector3<f64>>,
    cells_on_vertex: Vec<Vec<Option<usize>>>,
) -> GridInput {
    let n_cells = cells.len();
    GridInput {
        on_sphere: false,
        vertex_degree: 3,
        cells,
        vertices,
        cells_on_vertex: pad(cells_on_vertex, 3),
        mesh_density: vec![1.0; n_cells],
        meta: InputMeta::default(),
    }
}

fn pad(mut rows: Vec<Vec<Option<usize>>>, width: usize) -> Vec<Vec<Option<usize>>> {
    for row in rows.iter_mut() {
        row.resize(width, None);
    }
    rows
}

/// Seven hexagonal cells (center id 0, ring ids 1..=6 counter-clockwise from
/// +x) with unit center spacing, centered at (10, 10).
///
/// With `include_outer` every cell is a full hexagon (24 vertices). Without
/// it only the six vertices around the center cell are kept, so the ring
/// cells are open and fail the completeness check.
pub fn hex_patch(include_outer: bool) -> GridInput {
    hex_patch_at(Vector3::new(10.0, 10.0, 0.0), include_outer)
}

/// [`hex_patch`] with the center cell at `origin`.
pub fn hex_patch_at(origin: Vector3<f64>, include_outer: bool) -> GridInput {
    let radius = 1.0 / 3f64.sqrt();
    let mut cells = vec![origin];
    for k in 0..6 {
        let t = k as f64 * PI / 3.0;
        cells.push(origin + Vector3::new(t.cos(), t.sin(), 0.0));
    }

    // Vertices deduplicated on a fine lattice, first visit wins.
    let mut index: HashMap<(i64, i64), usize> = HashMap::new();
    let mut vertices = Vec::new();
    let mut cells_on_vertex: Vec<Vec<Option<usize>>> = Vec::new();
    for (cell, center) in cells.iter().enumerate() {
        for k in 0..6 {
            let t = FRAC_PI_6 + k as f64 * PI / 3.0;
            let p = center + Vector3::new(radius * t.cos(), radius * t.sin(), 0.0);
            let key = ((p.x * 1e6).round() as i64, (p.y * 1e6).round() as i64);
            let id = *index.entry(key).or_insert_with(|| {
                vertices.push(p);
                cells_on_vertex.push(Vec::new());
                vertices.len() - 1
            });
            cells_on_vertex[id].push(Some(cell));
        }
    }

    if !include_outer {
        let keep: Vec<usize> = (0..vertices.len())
            .filter(|&v| cells_on_vertex[v].contains(&Some(0)))
            .collect();
        vertices = keep.iter().map(|&v| vertices[v]).collect();
        cells_on_vertex = keep.iter().map(|&v| cells_on_vertex[v].clone()).collect();
    }
    planar_input(cells, vertices, cells_on_vertex)
}

/// `nx × ny` hexagons with unit center spacing on a doubly periodic plane.
///
/// Rows are staggered by half a cell, so `ny` must be even for the pattern to
/// close in y. Domain size is `nx` by `ny·√3/2`.
///
/// # Panics
///
/// If `nx < 3`, `ny < 4`, or `ny` is odd: smaller or odd layouts do not
/// close into a valid periodic hexagonal tiling.
pub fn periodic_hex(nx: usize, ny: usize) -> GridInput {
    assert!(nx >= 3 && ny >= 4 && ny % 2 == 0, "periodic_hex needs nx >= 3, even ny >= 4");
    // Integer lattice: x in half cells, y in thirds of a row.
    let dx = 0.5;
    let dy = 3f64.sqrt() / 6.0;
    let (wx, wy) = (2 * nx as i64, 3 * ny as i64);
    const CORNERS: [(i64, i64); 6] = [(1, 1), (0, 2), (-1, 1), (-1, -1), (0, -2), (1, -1)];

    let mut cells = Vec::with_capacity(nx * ny);
    let mut corners: BTreeMap<(i64, i64), Vec<Option<usize>>> = BTreeMap::new();
    for j in 0..ny as i64 {
        for i in 0..nx as i64 {
            let (cx, cy) = (2 * i + j % 2 + 1, 3 * (j + 1));
            let cell = cells.len();
            cells.push(Vector3::new(cx as f64 * dx, cy as f64 * dy, 0.0));
            for (ox, oy) in CORNERS {
                let key = ((cx + ox).rem_euclid(wx), (cy + oy).rem_euclid(wy));
                corners.entry(key).or_default().push(Some(cell));
            }
        }
    }
    let vertices = corners
        .keys()
        .map(|&(x, y)| Vector3::new(x as f64 * dx, y as f64 * dy, 0.0))
        .collect();
    planar_input(cells, vertices, corners.into_values().collect())
}

/// Icosahedron subdivided `level` times. Cells are the (normalized)
/// triangulation nodes and vertices the circumcenters of its triangles:
/// `10·4^level + 2` cells and `20·4^level` vertices.
pub fn icosphere(level: u32) -> GridInput {
    let phi = (1.0 + 5f64.sqrt()) / 2.0;
    let raw = [
        (0.0, 1.0, phi),
        (0.0, 1.0, -phi),
        (0.0, -1.0, phi),
        (0.0, -1.0, -phi),
        (1.0, phi, 0.0),
        (1.0, -phi, 0.0),
        (-1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (phi, 0.0, 1.0),
        (phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
    ];
    let raw: Vec<Vector3<f64>> = raw.iter().map(|&(x, y, z)| Vector3::new(x, y, z)).collect();

    // Faces are the triples at mutual distance 2.
    let adjacent = |a: usize, b: usize| ((raw[a] - raw[b]).norm_squared() - 4.0).abs() < 1e-9;
    let mut faces = Vec::new();
    for a in 0..12 {
        for b in (a + 1)..12 {
            for c in (b + 1)..12 {
                if adjacent(a, b) && adjacent(b, c) && adjacent(a, c) {
                    faces.push([a, b, c]);
                }
            }
        }
    }
    let mut nodes: Vec<Vector3<f64>> = raw.iter().map(|p| p.normalize()).collect();

    for _ in 0..level {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut midpoint = |a: usize, b: usize, nodes: &mut Vec<Vector3<f64>>| {
            *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
                let mid = (nodes[a] + nodes[b]).normalize();
                nodes.push(mid);
                nodes.len() - 1
            })
        };
        let mut finer = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut nodes);
            let bc = midpoint(b, c, &mut nodes);
            let ca = midpoint(c, a, &mut nodes);
            finer.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = finer;
    }

    let mut vertices = Vec::with_capacity(faces.len());
    let mut cells_on_vertex = Vec::with_capacity(faces.len());
    for [a, b, c] in faces {
        let (pa, pb, pc) = (nodes[a], nodes[b], nodes[c]);
        let mut center = (pb - pa).cross(&(pc - pa)).normalize();
        if center.dot(&(pa + pb + pc)) < 0.0 {
            center = -center;
        }
        vertices.push(center);
        cells_on_vertex.push(vec![Some(a), Some(b), Some(c)]);
    }

    let n_cells = nodes.len();
    GridInput {
        on_sphere: true,
        vertex_degree: 3,
        cells: nodes,
        vertices,
        cells_on_vertex,
        mesh_density: vec![1.0; n_cells],
        meta: InputMeta::default(),
    }
}

/// Renumber the vertices of `input` and shuffle each incidence row.
pub fn shuffle_vertices(input: &GridInput, seed: u64) -> GridInput {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..input.vertices.len()).collect();
    order.shuffle(&mut rng);
    let mut out = input.clone();
    out.vertices = order.iter().map(|&v| input.vertices[v]).collect();
    out.cells_on_vertex = order
        .iter()
        .map(|&v| {
            let mut row = input.cells_on_vertex[v].clone();
            row.shuffle(&mut rng);
            row
        })
        .collect();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_patch_counts() {
        let full = hex_patch(true);
        assert_eq!(full.cells.len(), 7);
        assert_eq!(full.vertices.len(), 24);
        let shared: Vec<usize> = full
            .cells_on_vertex
            .iter()
            .map(|row| row.iter().flatten().count())
            .collect();
        assert_eq!(shared.iter().filter(|&&n| n == 3).count(), 6);
        assert_eq!(shared.iter().filter(|&&n| n == 2).count(), 6);
        assert_eq!(shared.iter().filter(|&&n| n == 1).count(), 12);
        assert!(full.cells_on_vertex.iter().all(|row| row.len() == 3));

        let open = hex_patch(false);
        assert_eq!(open.vertices.len(), 6);
        assert!(open.cells_on_vertex.iter().all(|row| row.contains(&Some(0))));
    }

    #[test]
    fn hex_patch_at_moves_every_point() {
        let shifted = hex_patch_at(Vector3::zeros(), true);
        let reference = hex_patch(true);
        let offset = Vector3::new(10.0, 10.0, 0.0);
        for (a, b) in shifted.cells.iter().zip(&reference.cells) {
            assert!((a + offset - b).norm() < 1e-12);
        }
        for (a, b) in shifted.vertices.iter().zip(&reference.vertices) {
            assert!((a + offset - b).norm() < 1e-12);
        }
        assert_eq!(shifted.cells_on_vertex, reference.cells_on_vertex);
    }

    #[test]
    #[should_panic(expected = "even ny")]
    fn periodic_hex_rejects_odd_rows() {
        periodic_hex(4, 5);
    }

    #[test]
    fn periodic_hex_counts() {
        let input = periodic_hex(5, 4);
        assert_eq!(input.cells.len(), 20);
        assert_eq!(input.vertices.len(), 40);
        assert!(input
            .cells_on_vertex
            .iter()
            .all(|row| row.iter().flatten().count() == 3));
    }

    #[test]
    fn icosphere_counts_and_circumcenters() {
        for level in 0..3 {
            let input = icosphere(level);
            let f = 4usize.pow(level);
            assert_eq!(input.cells.len(), 10 * f + 2);
            assert_eq!(input.vertices.len(), 20 * f);
            for (v, row) in input.cells_on_vertex.iter().enumerate() {
                let p = input.vertices[v];
                let d: Vec<f64> = row
                    .iter()
                    .flatten()
                    .map(|&c| (input.cells[c] - p).norm())
                    .collect();
                assert!((d[0] - d[1]).abs() < 1e-12 && (d[0] - d[2]).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn shuffle_keeps_incidence() {
        let input = hex_patch(true);
        let shuffled = shuffle_vertices(&input, 11);
        for (v, p) in shuffled.vertices.iter().enumerate() {
            let before = input.vertices.iter().position(|q| q == p).unwrap();
            let mut a = shuffled.cells_on_vertex[v].clone();
            let mut b = input.cells_on_vertex[before].clone();
            a.sort();
            b.sort();
            assert_eq!(a, b);
        }
    }
}
