use nalgebra::*;

/// A straight piece of a level line, between two data-space points.
pub type Segment = [(f64, f64); 2];

// Point where the level crosses the edge between (pa, za) and (pb, zb), if it does.
fn crossing(pa : (f64, f64), za : f64, pb : (f64, f64), zb : f64, level : f64) -> Option<(f64, f64)> {
    if (za >= level) == (zb >= level) {
        return None;
    }
    let t = (level - za) / (zb - za);
    Some((pa.0 + t * (pb.0 - pa.0), pa.1 + t * (pb.1 - pa.1)))
}

/// Marching squares over a surface tabulated with 'xy' indexing (z[(j, i)] is the value
/// at (x[i], y[j])). Each grid cell crossed by the level contributes one segment, or two for
/// saddle cells, which are disambiguated by the average of the four corners. Segments are
/// not joined into polylines. Corners with NaN values count as below the level.
pub fn contour_segments(x : &DVector<f64>, y : &DVector<f64>, z : &DMatrix<f64>, level : f64) -> Vec<Segment> {
    let mut segs = Vec::new();
    if x.nrows() < 2 || y.nrows() < 2 {
        return segs;
    }
    for j in 0..(y.nrows() - 1) {
        for i in 0..(x.nrows() - 1) {
            let (p00, p10) = ((x[i], y[j]), (x[i+1], y[j]));
            let (p01, p11) = ((x[i], y[j+1]), (x[i+1], y[j+1]));
            let (z00, z10, z01, z11) = (z[(j, i)], z[(j, i+1)], z[(j+1, i)], z[(j+1, i+1)]);

            // Edges, counter-clockwise from the bottom one.
            let bottom = crossing(p00, z00, p10, z10, level);
            let right = crossing(p10, z10, p11, z11, level);
            let top = crossing(p01, z01, p11, z11, level);
            let left = crossing(p00, z00, p01, z01, level);

            match (bottom, right, top, left) {
                (Some(b), Some(r), Some(t), Some(l)) => {
                    let center = 0.25 * (z00 + z10 + z01 + z11);
                    if (z00 >= level) == (center >= level) {
                        segs.push([b, r]);
                        segs.push([t, l]);
                    } else {
                        segs.push([b, l]);
                        segs.push([r, t]);
                    }
                },
                _ => {
                    let pts : Vec<(f64, f64)> = [bottom, right, top, left].iter().filter_map(|p| *p ).collect();
                    if pts.len() == 2 {
                        segs.push([pts[0], pts[1]]);
                    }
                }
            }
        }
    }
    segs
}
