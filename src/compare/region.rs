// Connected-component extraction: flood-fill the diff mask into bounding
// boxes, dropping components too small to be meaningful highlights.

use image::RgbaImage;

use crate::compare::Rect;
use crate::compare::mask::is_set;

/// Extract the bounding box of every maximal 4-connected component of set
/// mask pixels, discarding boxes with area below `min_area`.
///
/// The fill uses an explicit work stack over a linear visited array; page
/// bitmaps run to millions of pixels, which would overflow the call stack
/// under a recursive fill. Components are bounding boxes, not polygons:
/// only originally-4-connected pixels form one component. Discovery order
/// is deterministic for a fixed mask but carries no meaning.
pub fn extract_regions(mask: &RgbaImage, min_area: u32) -> Vec<Rect> {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let w = width as usize;
    let h = height as usize;

    let set: Vec<bool> = mask.pixels().map(is_set).collect();
    let mut visited = vec![false; w * h];
    let mut stack: Vec<usize> = Vec::new();
    let mut boxes = Vec::new();

    for start in 0..w * h {
        if !set[start] || visited[start] {
            continue;
        }

        let mut min_x = w;
        let mut max_x = 0usize;
        let mut min_y = h;
        let mut max_y = 0usize;

        visited[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);

            // 4-neighborhood only: corner-touching pixels stay separate.
            if x > 0 {
                push_unvisited(idx - 1, &set, &mut visited, &mut stack);
            }
            if x + 1 < w {
                push_unvisited(idx + 1, &set, &mut visited, &mut stack);
            }
            if y > 0 {
                push_unvisited(idx - w, &set, &mut visited, &mut stack);
            }
            if y + 1 < h {
                push_unvisited(idx + w, &set, &mut visited, &mut stack);
            }
        }

        let bbox_width = (max_x - min_x + 1) as u32;
        let bbox_height = (max_y - min_y + 1) as u32;
        if bbox_width * bbox_height >= min_area {
            boxes.push(Rect::new(
                min_x as f64,
                min_y as f64,
                bbox_width as f64,
                bbox_height as f64,
            ));
        }
    }

    boxes
}

#[inline]
fn push_unvisited(idx: usize, set: &[bool], visited: &mut [bool], stack: &mut Vec<usize>) {
    if set[idx] && !visited[idx] {
        visited[idx] = true;
        stack.push(idx);
    }
}
