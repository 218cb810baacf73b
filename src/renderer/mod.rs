use crate::pipeline::{clip, perspective_weights, raster, Vertex, VertexBuffer};
use crate::prelude::*;
use crate::scene::Scene;

use pbr::ProgressBar;

use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Near and far clip distances along the camera's negative z-axis.
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 100.0;

/// Triangles whose screen-space orientation is above this are back faces or
/// degenerate. Front faces wind counter-clockwise in NDC, which the
/// viewport y-flip turns into negative screen-space area.
const BACKFACE_EPSILON: f32 = 1e-6;

pub struct RenderOutput {
    pub image: Film<Color>,
    pub depth: DepthBuffer,
}

#[derive(Default, Copy, Clone)]
pub struct Renderer {
    /// Draw triangle edges instead of filling them.
    pub wireframe: bool,
    pub show_progress: bool,
}

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }

    /// Renders the scene: for each object, transform, clip, divide, map to
    /// the viewport, cull, and rasterize with a Blinn-Phong shader.
    ///
    /// Objects draw in declaration order and triangles in index order; the
    /// depth buffer alone resolves overlap.
    pub fn render(&self, scene: &Scene) -> RenderOutput {
        let (width, height) = (scene.width as usize, scene.height as usize);
        let mut image = Film::new(width, height, Color::BLACK);
        let mut depth = Film::new_depth(width, height);

        let projection = Matrix4::perspective_projection(
            scene.fov,
            scene.aspect_ratio(),
            NEAR_PLANE,
            FAR_PLANE,
        );
        let screen = Matrix4::viewport(scene.width, scene.height);
        let view = scene.camera.view_matrix();
        let clip_from_world = projection * view;

        let total_triangles: u64 = scene
            .objects
            .iter()
            .map(|object| object.mesh.triangle_count() as u64)
            .sum();
        info!(
            "rendering {} triangles across {} objects at {}x{}",
            total_triangles,
            scene.objects.len(),
            width,
            height
        );

        let progress = Arc::new(AtomicUsize::new(0));
        let watcher = self.show_progress.then(|| {
            let progress = Arc::clone(&progress);
            let mut bar = ProgressBar::new(total_triangles);
            thread::spawn(move || {
                let mut seen = 0;
                while seen < total_triangles as usize {
                    let done = progress.load(Ordering::Relaxed);
                    bar.add((done - seen) as u64);
                    seen = done;
                    thread::sleep(Duration::from_millis(250));
                }
                bar.finish();
            })
        });

        for object in &scene.objects {
            let mesh = &object.mesh;
            let model = object.model_matrix();

            // transform every mesh vertex to world and clip space
            let mut vertices = VertexBuffer::with_capacity(mesh.positions.len());
            for i in 0..mesh.positions.len() {
                let world = model * mesh.positions[i];
                let mut normal = mesh.normals[i];
                normal.w = 0.0;
                vertices.push(Vertex {
                    world,
                    normal: model * normal,
                    clip: clip_from_world * world,
                    texcoord: mesh.texcoords[i],
                    screen: Default::default(),
                });
            }

            // clip each triangle, then rebuild triangles from the surviving
            // polygons by fan triangulation
            let mut triangles: Vec<[u32; 3]> = Vec::with_capacity(mesh.triangle_count());
            let mut polygon = Vec::with_capacity(8);
            for triangle in mesh.elements.chunks_exact(3) {
                polygon.clear();
                polygon.extend_from_slice(triangle);
                clip::sutherland_hodgman(&mut polygon, &mut vertices);
                for i in 1..polygon.len().saturating_sub(1) {
                    triangles.push([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }

            // perspective divide and viewport transform over the whole
            // buffer; the reciprocal of w stays behind for the shader
            for vertex in vertices.vertices_mut() {
                let mut w = vertex.clip.w;
                if w != 0.0 {
                    w = 1.0 / w;
                    vertex.clip = vertex.clip * w;
                }
                vertex.screen = (screen * vertex.clip).xyz();
                vertex.clip.w = w;
            }

            for [i0, i1, i2] in triangles {
                let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);

                let orientation = raster::twice_signed_area(v0.screen, v1.screen, v2.screen);
                if orientation >= -BACKFACE_EPSILON {
                    continue;
                }

                if self.wireframe {
                    raster::draw_line(&mut image, v0.screen, v1.screen);
                    raster::draw_line(&mut image, v1.screen, v2.screen);
                    raster::draw_line(&mut image, v2.screen, v0.screen);
                    continue;
                }

                let shader = |a: f32, b: f32, c: f32| {
                    let (pa, pb, pc) =
                        perspective_weights(a, b, c, v0.clip.w, v1.clip.w, v2.clip.w);
                    let world = v0.world * pa + v1.world * pb + v2.world * pc;
                    let normal =
                        (v0.normal * pa + v1.normal * pb + v2.normal * pc).normalized();
                    let texcoord = v0.texcoord * pa + v1.texcoord * pb + v2.texcoord * pc;
                    object.material.shade(
                        world,
                        normal,
                        texcoord,
                        &scene.lights,
                        scene.camera.position,
                    )
                };
                raster::fill_triangle(&mut image, &mut depth, shader, v0.screen, v1.screen, v2.screen);
            }

            progress.fetch_add(mesh.triangle_count(), Ordering::Relaxed);
        }

        if let Some(watcher) = watcher {
            if let Err(panic) = watcher.join() {
                warn!("progress watcher thread panicked: {:?}", panic);
            }
        }

        RenderOutput { image, depth }
    }
}

/// Writes the rendered frame and its grayscale depth companion.
pub fn output_film(
    output: &RenderOutput,
    image_path: &Path,
    depth_path: &Path,
) -> Result<(), Box<dyn Error>> {
    output.image.write_png(image_path)?;
    output.depth.to_grayscale().write_png(depth_path)?;
    info!(
        "wrote {} and {}",
        image_path.display(),
        depth_path.display()
    );
    Ok(())
}
