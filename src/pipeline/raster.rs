use crate::parallel::parallel_for;
use crate::prelude::*;

/// Barycentric weights down to this value still count as covered; the
/// negative tolerance absorbs floating-point error on shared edges.
const COVERAGE_EPSILON: f32 = -1e-5;

/// Twice-signed-areas below this magnitude are degenerate.
const AREA_EPSILON: f32 = 1e-10;

/// Shared access to one frame buffer during a single triangle's fill.
///
/// Workers claim disjoint bounding-box indices and each index maps to
/// exactly one pixel, so no two workers ever touch the same slot.
struct FramePtr<T>(*mut T);

unsafe impl<T> Send for FramePtr<T> {}
unsafe impl<T> Sync for FramePtr<T> {}

fn barycentric(px: f32, py: f32, s0: Vec3, s1: Vec3, s2: Vec3, area: f32) -> (f32, f32, f32) {
    let b = ((s0.x - s2.x) * (py - s2.y) - (px - s2.x) * (s0.y - s2.y)) / area;
    let c = ((s1.x - s0.x) * (py - s0.y) - (px - s0.x) * (s1.y - s0.y)) / area;
    (1.0 - b - c, b, c)
}

/// Twice the signed area of a screen-space triangle.
pub fn twice_signed_area(s0: Vec3, s1: Vec3, s2: Vec3) -> f32 {
    (s1.x - s0.x) * (s2.y - s0.y) - (s2.x - s0.x) * (s1.y - s0.y)
}

/// Fills every pixel whose center lies inside the screen-space triangle and
/// passes the depth test, coloring it with `shader(a, b, c)`.
///
/// Pixels inside the bounding box are visited in parallel; iteration order
/// is unspecified and must not matter. Degenerate triangles are skipped
/// silently.
pub fn fill_triangle<S>(
    image: &mut Film<Color>,
    depth: &mut DepthBuffer,
    shader: S,
    s0: Vec3,
    s1: Vec3,
    s2: Vec3,
) where
    S: Fn(f32, f32, f32) -> Color + Sync,
{
    let (width, height) = (image.width, image.height);

    let clamp_x = move |value: f32| value.round().clamp(0.0, width as f32) as usize;
    let clamp_y = move |value: f32| value.round().clamp(0.0, height as f32) as usize;
    let min_u = clamp_x(s0.x.min(s1.x).min(s2.x));
    let max_u = clamp_x(s0.x.max(s1.x).max(s2.x));
    let min_v = clamp_y(s0.y.min(s1.y).min(s2.y));
    let max_v = clamp_y(s0.y.max(s1.y).max(s2.y));
    if max_u <= min_u || max_v <= min_v {
        return;
    }

    let area = twice_signed_area(s0, s1, s2);
    if area.abs() < AREA_EPSILON {
        return;
    }

    let (z0, z1, z2) = (s0.z, s1.z, s2.z);
    let span = (max_u - min_u) as u32;
    let rows = (max_v - min_v) as u32;
    let pixels = FramePtr(image.buffer.as_mut_ptr());
    let depths = FramePtr(depth.buffer.as_mut_ptr());

    parallel_for(0, span * rows, |index| {
        let pixels = &pixels;
        let depths = &depths;
        let u = min_u + (index % span) as usize;
        let v = min_v + (index / span) as usize;
        let (px, py) = (u as f32 + 0.5, v as f32 + 0.5);

        let (a, b, c) = barycentric(px, py, s0, s1, s2, area);
        if a < COVERAGE_EPSILON || b < COVERAGE_EPSILON || c < COVERAGE_EPSILON {
            return;
        }

        // screen-space z interpolates linearly after the perspective divide
        let z = a * z0 + b * z1 + c * z2;
        let offset = v * width + u;
        unsafe {
            let depth_slot = depths.0.add(offset);
            if z > *depth_slot {
                return;
            }
            *depth_slot = z;
            *pixels.0.add(offset) = shader(a, b, c);
        }
    });
}

/// Draws a line between two screen-space points with the DDA method.
/// Used for wireframe output.
pub fn draw_line(image: &mut Film<Color>, start: Vec3, end: Vec3) {
    let du = end.x - start.x;
    let dv = end.y - start.y;
    let step = du.abs().max(dv.abs());
    if step < 1.0 {
        plot(image, start.x, start.y);
        return;
    }

    let (du, dv) = (du / step, dv / step);
    let (mut u, mut v) = (start.x, start.y);
    let mut i = 0;
    while i as f32 <= step {
        plot(image, u, v);
        u += du;
        v += dv;
        i += 1;
    }
}

fn plot(image: &mut Film<Color>, u: f32, v: f32) {
    let (u, v) = (u.round(), v.round());
    if u < 0.0 || v < 0.0 {
        return;
    }
    let (u, v) = (u as usize, v as usize);
    if u < image.width && v < image.height {
        image.write_at(u, v, Color::WHITE);
    }
}
