use ndarray::Array2;

use crate::geometry::primitives::Point;

/// 4-connected neighbourhood, used to group edge pixels into components.
/// Diagonal steps are excluded, they bridge separate boundaries into straight-line artifacts.
const NEIGHBORS_4: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Moore neighbourhood in clockwise order (y axis pointing down), starting west.
const NEIGHBORS_8: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// A connected set of edge pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeComponent {
    /// Label of the component in the label grid (labels start at 1, 0 means unlabelled)
    pub label: u32,
    /// First pixel of the component in raster order
    pub seed: (usize, usize),
    /// Number of pixels in the component
    pub size: usize,
}

/// Groups all edge pixels into 4-connected components.
///
/// Pixels are scanned in raster order, each unvisited edge pixel seeds a stack-based flood fill.
/// Returns the label grid together with the components, in order of discovery.
pub fn label_components(edges: &Array2<bool>) -> (Array2<u32>, Vec<EdgeComponent>) {
    let (height, width) = edges.dim();
    let mut labels = Array2::<u32>::zeros((height, width));
    let mut components = vec![];
    let mut stack = vec![];

    for y in 0..height {
        for x in 0..width {
            if !edges[[y, x]] || labels[[y, x]] != 0 {
                continue;
            }
            let label = components.len() as u32 + 1;
            let mut size = 0;
            labels[[y, x]] = label;
            stack.push((x, y));

            while let Some(pixel) = stack.pop() {
                size += 1;
                for offset in NEIGHBORS_4 {
                    let Some((n_x, n_y)) = neighbor(pixel, offset, width, height) else {
                        continue;
                    };
                    if edges[[n_y, n_x]] && labels[[n_y, n_x]] == 0 {
                        labels[[n_y, n_x]] = label;
                        stack.push((n_x, n_y));
                    }
                }
            }

            components.push(EdgeComponent {
                label,
                seed: (x, y),
                size,
            });
        }
    }
    (labels, components)
}

/// Orders the pixels of a component into a closed path by walking its outer border
/// (Moore-neighbour tracing), starting at the component's seed.
///
/// Only pixels carrying the component's label are followed, so the walk never crosses into
/// a neighbouring component.
pub fn trace_border(labels: &Array2<u32>, component: &EdgeComponent) -> Vec<Point> {
    let (height, width) = labels.dim();
    let in_component = |pixel: (usize, usize)| labels[[pixel.1, pixel.0]] == component.label;

    let start = component.seed;
    let mut path = vec![start];
    let mut current = start;
    //the seed is the first pixel of its component in raster order, its west neighbour is never part of it
    let mut backtrack = 0;

    //every border pixel is entered at most 4 times
    for _ in 0..4 * component.size + 8 {
        let next = (1..=8)
            .map(|k| (backtrack + k) % 8)
            .find_map(|dir| {
                neighbor(current, NEIGHBORS_8[dir], width, height)
                    .filter(|&p| in_component(p))
                    .map(|p| (p, dir))
            });

        let Some((next, dir)) = next else {
            //isolated pixel
            break;
        };

        if current == start && path.len() > 1 && next == path[1] {
            //back at the start, about to repeat the walk
            path.pop();
            break;
        }

        //the last neighbour examined before `next` becomes the new backtrack, relative to `next`
        let (prev_dx, prev_dy) = NEIGHBORS_8[(dir + 7) % 8];
        let (dx, dy) = NEIGHBORS_8[dir];
        backtrack = NEIGHBORS_8
            .iter()
            .position(|&o| o == (prev_dx - dx, prev_dy - dy))
            .expect("consecutive Moore neighbours are adjacent");

        path.push(next);
        current = next;
    }

    path.into_iter()
        .map(|(x, y)| Point(x as f32, y as f32))
        .collect()
}

fn neighbor(
    (x, y): (usize, usize),
    (dx, dy): (isize, isize),
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let n_x = x.checked_add_signed(dx)?;
    let n_y = y.checked_add_signed(dy)?;
    (n_x < width && n_y < height).then_some((n_x, n_y))
}
