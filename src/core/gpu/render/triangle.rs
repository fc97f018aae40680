// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Triangle rendering implementation
//!
//! Translates a monochrome (flat-shaded) GP0 triangle command into a
//! [`Triangle`] and forwards it to the renderer. Rasterization and
//! semi-transparency blending are the renderer's concern, not the GPU
//! front-end's.

use super::super::primitives::{Color, Triangle, Vertex};
use super::super::GPU;

impl GPU {
    /// Render a monochrome (flat-shaded) triangle
    ///
    /// Applies the drawing offset to all vertices and forwards the resulting
    /// triangle to the renderer. `semi_transparent` is recorded for parity
    /// with the command stream but blending is a renderer-side decision.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // This is a private method used internally by the GPU
    /// use psx_core::core::gpu::{GPU, Vertex, Color};
    ///
    /// let mut gpu = GPU::new();
    ///
    /// let vertices = [
    ///     Vertex { x: 100, y: 100 },
    ///     Vertex { x: 200, y: 100 },
    ///     Vertex { x: 150, y: 200 },
    /// ];
    /// let color = Color { r: 255, g: 0, b: 0 };
    /// gpu.render_monochrome_triangle(&vertices, &color, false);
    /// ```
    pub(crate) fn render_monochrome_triangle(
        &mut self,
        vertices: &[Vertex; 3],
        color: &Color,
        semi_transparent: bool,
    ) {
        let _ = semi_transparent;

        let v1 = Vertex {
            x: vertices[0].x.wrapping_add(self.draw_offset.0),
            y: vertices[0].y.wrapping_add(self.draw_offset.1),
        };
        let v2 = Vertex {
            x: vertices[1].x.wrapping_add(self.draw_offset.0),
            y: vertices[1].y.wrapping_add(self.draw_offset.1),
        };
        let v3 = Vertex {
            x: vertices[2].x.wrapping_add(self.draw_offset.0),
            y: vertices[2].y.wrapping_add(self.draw_offset.1),
        };

        log::trace!(
            "Rendering triangle: {:?}, {:?}, {:?} color=({},{},{})",
            v1,
            v2,
            v3,
            color.r,
            color.g,
            color.b,
        );

        self.renderer.borrow_mut().draw_triangle(Triangle {
            v1,
            c1: *color,
            v2,
            c2: *color,
            v3,
            c3: *color,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::renderer::BufferRenderer;

    fn gpu_with_buffer() -> (GPU, Rc<RefCell<BufferRenderer>>) {
        let renderer = Rc::new(RefCell::new(BufferRenderer::new()));
        let gpu = GPU::with_renderer(renderer.clone());
        (gpu, renderer)
    }

    #[test]
    fn test_monochrome_triangle_basic_rendering() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color { r: 255, g: 0, b: 0 };

        gpu.render_monochrome_triangle(&vertices, &color, false);

        let r = renderer.borrow();
        assert_eq!(r.triangle_count, 1);
        let tri = r.last_triangle.expect("triangle recorded");
        assert_eq!(tri.v1, vertices[0]);
        assert_eq!(tri.v2, vertices[1]);
        assert_eq!(tri.v3, vertices[2]);
        assert_eq!(tri.c1, color);
        assert_eq!(tri.c2, color);
        assert_eq!(tri.c3, color);
    }

    #[test]
    fn test_monochrome_triangle_with_drawing_offset() {
        let (mut gpu, renderer) = gpu_with_buffer();
        gpu.draw_offset = (50, 30);

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color { r: 0, g: 255, b: 0 };

        gpu.render_monochrome_triangle(&vertices, &color, false);

        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.v1, Vertex { x: 150, y: 130 });
        assert_eq!(tri.v2, Vertex { x: 250, y: 130 });
        assert_eq!(tri.v3, Vertex { x: 200, y: 230 });
    }

    #[test]
    fn test_monochrome_triangle_coordinate_wrapping() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Large offset wraps around signed 16-bit arithmetic
        gpu.draw_offset = (1000, 500);

        let vertices = [
            Vertex { x: 50, y: 50 },
            Vertex { x: 100, y: 50 },
            Vertex { x: 75, y: 100 },
        ];
        let color = Color {
            r: 255,
            g: 255,
            b: 255,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_negative_coordinates() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: -50, y: -50 },
            Vertex { x: 50, y: -50 },
            Vertex { x: 0, y: 50 },
        ];
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);

        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.v1, vertices[0]);
    }

    #[test]
    fn test_monochrome_triangle_maximum_vertex_distance() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Per PSX-SPX: Maximum vertex distance is 1023 horizontal, 511 vertical
        let vertices = [
            Vertex { x: 0, y: 0 },
            Vertex { x: 1023, y: 0 },
            Vertex { x: 512, y: 511 },
        ];
        let color = Color {
            r: 255,
            g: 0,
            b: 255,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_semi_transparent_flag_is_forwarded_to_caller_only() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Blending is a renderer concern; the GPU front-end just hands over
        // the triangle regardless of the semi_transparent flag.
        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color { r: 0, g: 0, b: 0 };

        gpu.draw_mode.semi_transparency = 0;
        gpu.render_monochrome_triangle(&vertices, &color, true);

        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_degenerate_colinear_vertices() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 300, y: 100 }, // All on same horizontal line
        ];
        let color = Color { r: 255, g: 0, b: 0 };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_degenerate_single_point() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 150, y: 150 },
            Vertex { x: 150, y: 150 },
            Vertex { x: 150, y: 150 },
        ];
        let color = Color { r: 0, g: 255, b: 0 };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_vertex_order_independence() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Per PSX-SPX: Backface culling is not automatic
        let vertices_cw = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let vertices_ccw = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 150, y: 200 },
            Vertex { x: 200, y: 100 },
        ];
        let color = Color {
            r: 255,
            g: 255,
            b: 0,
        };

        gpu.render_monochrome_triangle(&vertices_cw, &color, false);
        gpu.render_monochrome_triangle(&vertices_ccw, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 2);
    }

    #[test]
    fn test_monochrome_triangle_boundary_coordinates() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Per PSX-SPX: Coordinates at VRAM boundaries (1024x512)
        let vertices = [
            Vertex { x: 0, y: 0 },
            Vertex { x: 1023, y: 0 },
            Vertex { x: 0, y: 511 },
        ];
        let color = Color { r: 0, g: 0, b: 255 };

        gpu.render_monochrome_triangle(&vertices, &color, false);

        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.v2, vertices[1]);
        assert_eq!(tri.v3, vertices[2]);
    }

    #[test]
    fn test_monochrome_triangle_color_is_forwarded_unmodified() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color {
            r: 255,
            g: 128,
            b: 64,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);

        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.c1, color);
    }

    #[test]
    fn test_monochrome_triangle_zero_area() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 101, y: 100 },
            Vertex { x: 100, y: 101 },
        ];
        let color = Color {
            r: 255,
            g: 255,
            b: 255,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_large_coordinates_wrapping() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 30000, y: 30000 },
            Vertex { x: 31000, y: 30000 },
            Vertex { x: 30500, y: 31000 },
        ];
        let color = Color {
            r: 128,
            g: 64,
            b: 192,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }

    #[test]
    fn test_monochrome_triangle_all_black() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color { r: 0, g: 0, b: 0 };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.c1, color);
    }

    #[test]
    fn test_monochrome_triangle_all_white() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let color = Color {
            r: 255,
            g: 255,
            b: 255,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        let tri = renderer.borrow().last_triangle.expect("triangle recorded");
        assert_eq!(tri.c1, color);
    }

    #[test]
    fn test_monochrome_triangle_multiple_overlapping() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];

        let color1 = Color { r: 255, g: 0, b: 0 };
        gpu.render_monochrome_triangle(&vertices, &color1, false);

        let color2 = Color { r: 0, g: 255, b: 0 };
        gpu.render_monochrome_triangle(&vertices, &color2, false);

        let r = renderer.borrow();
        assert_eq!(r.triangle_count, 2);
        assert_eq!(r.last_triangle.unwrap().c1, color2);
    }

    #[test]
    fn test_monochrome_triangle_with_extreme_offset() {
        let (mut gpu, renderer) = gpu_with_buffer();
        gpu.draw_offset = (32000, 16000);

        let vertices = [
            Vertex { x: 0, y: 0 },
            Vertex { x: 100, y: 0 },
            Vertex { x: 50, y: 100 },
        ];
        let color = Color {
            r: 192,
            g: 192,
            b: 0,
        };

        gpu.render_monochrome_triangle(&vertices, &color, false);
        assert_eq!(renderer.borrow().triangle_count, 1);
    }
}
