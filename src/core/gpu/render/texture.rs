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

//! Textured primitive rendering implementation
//!
//! Translates textured GP0 triangle/quad commands into [`TexturedTriangle`]
//! values and forwards them to the renderer. Texture sampling, CLUT lookup,
//! and color modulation are the renderer's concern, not the GPU front-end's.

use super::super::primitives::{Color, TexCoord, TextureInfo, TexturedTriangle, Vertex};
use super::super::GPU;

impl GPU {
    /// Render a textured triangle
    ///
    /// Applies the drawing offset to all vertices and forwards the resulting
    /// triangle, with its per-vertex texture coordinates, to the renderer.
    ///
    /// # Color Modulation
    ///
    /// `color` is the tint/modulation color the renderer multiplies with the
    /// sampled texture. For normal brightness, use (128, 128, 128).
    ///
    /// # Notes
    ///
    /// `semi_transparent` is recorded for parity with the command stream but
    /// blending is a renderer-side decision.
    pub(crate) fn render_textured_triangle(
        &mut self,
        vertices: &[Vertex; 3],
        texcoords: &[TexCoord; 3],
        texture_info: &TextureInfo,
        color: &Color,
        semi_transparent: bool,
    ) {
        let _ = semi_transparent;

        let v0 = Vertex {
            x: vertices[0].x.wrapping_add(self.draw_offset.0),
            y: vertices[0].y.wrapping_add(self.draw_offset.1),
        };
        let v1 = Vertex {
            x: vertices[1].x.wrapping_add(self.draw_offset.0),
            y: vertices[1].y.wrapping_add(self.draw_offset.1),
        };
        let v2 = Vertex {
            x: vertices[2].x.wrapping_add(self.draw_offset.0),
            y: vertices[2].y.wrapping_add(self.draw_offset.1),
        };

        log::trace!(
            "Rendering textured triangle: v={:?},{:?},{:?} t={:?},{:?},{:?} color=({},{},{})",
            v0, v1, v2,
            texcoords[0], texcoords[1], texcoords[2],
            color.r, color.g, color.b
        );

        self.renderer.borrow_mut().draw_textured_triangle(TexturedTriangle {
            color: *color,
            vertices: [(v0, texcoords[0]), (v1, texcoords[1]), (v2, texcoords[2])],
            texture: *texture_info,
        });
    }

    /// Render a textured quadrilateral
    ///
    /// Splits the quad into two triangles and renders them as textured primitives.
    /// The quad is split along the v0-v2 diagonal.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Array of 4 vertices defining the quad (in order: v0, v1, v2, v3)
    /// * `texcoords` - Array of 4 texture coordinates corresponding to vertices
    /// * `texture_info` - Texture page and CLUT information
    /// * `color` - Color tint to modulate with texture
    /// * `semi_transparent` - Whether semi-transparency is enabled
    ///
    /// # Quad Splitting
    ///
    /// The quad is split into two triangles:
    /// - Triangle 1: (v0, v1, v2)
    /// - Triangle 2: (v1, v2, v3)
    ///
    /// This matches the PlayStation GPU's quadrilateral rendering behavior.
    ///
    /// # Notes
    ///
    /// `semi_transparent` is forwarded to both triangles; blending is a
    /// renderer-side decision.
    pub(crate) fn render_textured_quad(
        &mut self,
        vertices: &[Vertex; 4],
        texcoords: &[TexCoord; 4],
        texture_info: &TextureInfo,
        color: &Color,
        semi_transparent: bool,
    ) {
        // Split quad into two triangles: (v0,v1,v2) and (v1,v2,v3)
        let tri1_verts = [vertices[0], vertices[1], vertices[2]];
        let tri1_texcoords = [texcoords[0], texcoords[1], texcoords[2]];

        let tri2_verts = [vertices[1], vertices[2], vertices[3]];
        let tri2_texcoords = [texcoords[1], texcoords[2], texcoords[3]];

        self.render_textured_triangle(
            &tri1_verts,
            &tri1_texcoords,
            texture_info,
            color,
            semi_transparent,
        );
        self.render_textured_triangle(
            &tri2_verts,
            &tri2_texcoords,
            texture_info,
            color,
            semi_transparent,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::gpu::TextureDepth;
    use crate::core::renderer::BufferRenderer;

    fn gpu_with_buffer() -> (GPU, Rc<RefCell<BufferRenderer>>) {
        let renderer = Rc::new(RefCell::new(BufferRenderer::new()));
        let gpu = GPU::with_renderer(renderer.clone());
        (gpu, renderer)
    }

    fn texture_info() -> TextureInfo {
        TextureInfo {
            page_x: 0,
            page_y: 0,
            clut_x: 0,
            clut_y: 0,
            depth: TextureDepth::T15Bit,
        }
    }

    #[test]
    fn test_textured_triangle_basic() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let r = renderer.borrow();
        assert_eq!(r.textured_triangle_count, 1);
        let tri = r.last_textured_triangle.expect("triangle recorded");
        assert_eq!(tri.color, color);
        assert_eq!(tri.vertices[0], (vertices[0], texcoords[0]));
        assert_eq!(tri.vertices[1], (vertices[1], texcoords[1]));
        assert_eq!(tri.vertices[2], (vertices[2], texcoords[2]));
    }

    #[test]
    fn test_textured_triangle_with_drawing_offset() {
        let (mut gpu, renderer) = gpu_with_buffer();
        gpu.draw_offset = (50, 30);

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.vertices[0].0, Vertex { x: 150, y: 130 });
        assert_eq!(tri.vertices[2].0, Vertex { x: 200, y: 230 });
    }

    #[test]
    fn test_textured_triangle_color_modulation_is_forwarded() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();

        // Per PSX-SPX: (128,128,128) = normal brightness
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.color, color);
    }

    #[test]
    fn test_textured_triangle_texture_coordinates() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];

        // Per PSX-SPX: Texture coordinates are 8-bit (0-255)
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 255, v: 0 },
            TexCoord { u: 128, v: 255 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.vertices[1].1, texcoords[1]);
        assert_eq!(tri.vertices[2].1, texcoords[2]);
    }

    #[test]
    fn test_textured_quad_basic() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 200, y: 200 },
            Vertex { x: 100, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 31, v: 0 },
            TexCoord { u: 31, v: 31 },
            TexCoord { u: 0, v: 31 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_quad(&vertices, &texcoords, &info, &color, false);

        assert_eq!(renderer.borrow().textured_triangle_count, 2);
    }

    #[test]
    fn test_textured_quad_decomposition() {
        let (mut gpu, renderer) = gpu_with_buffer();

        // Per implementation: Quad splits into (v0,v1,v2) and (v1,v2,v3)
        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 200, y: 200 },
            Vertex { x: 100, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 15, v: 15 },
            TexCoord { u: 0, v: 15 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_quad(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.vertices[0].0, vertices[1]);
        assert_eq!(tri.vertices[1].0, vertices[2]);
        assert_eq!(tri.vertices[2].0, vertices[3]);
    }

    #[test]
    fn test_textured_triangle_texture_page() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = TextureInfo {
            page_x: 64,
            page_y: 0,
            clut_x: 0,
            clut_y: 0,
            depth: TextureDepth::T15Bit,
        };
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.texture.page_x, 64);
    }

    #[test]
    fn test_textured_triangle_4bit_texture() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = TextureInfo {
            page_x: 64,
            page_y: 0,
            clut_x: 0,
            clut_y: 0,
            depth: TextureDepth::T4Bit,
        };
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.texture.depth, TextureDepth::T4Bit);
    }

    #[test]
    fn test_textured_triangle_8bit_texture() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = TextureInfo {
            page_x: 128,
            page_y: 0,
            clut_x: 0,
            clut_y: 1,
            depth: TextureDepth::T8Bit,
        };
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.texture.depth, TextureDepth::T8Bit);
        assert_eq!(tri.texture.clut_y, 1);
    }

    #[test]
    fn test_textured_triangle_negative_coordinates() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: -50, y: -50 },
            Vertex { x: 100, y: -50 },
            Vertex { x: 25, y: 100 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);
        assert_eq!(renderer.borrow().textured_triangle_count, 1);
    }

    #[test]
    fn test_textured_triangle_boundary_coordinates() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 0, y: 0 },
            Vertex { x: 1023, y: 0 },
            Vertex { x: 512, y: 511 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 255, v: 0 },
            TexCoord { u: 128, v: 255 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);
        assert_eq!(renderer.borrow().textured_triangle_count, 1);
    }

    #[test]
    fn test_textured_quad_with_offset() {
        let (mut gpu, renderer) = gpu_with_buffer();
        gpu.draw_offset = (100, 50);

        let vertices = [
            Vertex { x: 50, y: 50 },
            Vertex { x: 150, y: 50 },
            Vertex { x: 150, y: 150 },
            Vertex { x: 50, y: 150 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 15, v: 15 },
            TexCoord { u: 0, v: 15 },
        ];
        let info = texture_info();
        let color = Color {
            r: 128,
            g: 128,
            b: 128,
        };

        gpu.render_textured_quad(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.vertices[2].0, Vertex { x: 150, y: 250 });
    }

    #[test]
    fn test_textured_triangle_darken_modulation_color_forwarded() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();

        // Per PSX-SPX: Values < 128 darken the texture
        let color = Color {
            r: 64,
            g: 64,
            b: 64,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.color, color);
    }

    #[test]
    fn test_textured_triangle_brighten_modulation_color_forwarded() {
        let (mut gpu, renderer) = gpu_with_buffer();

        let vertices = [
            Vertex { x: 100, y: 100 },
            Vertex { x: 200, y: 100 },
            Vertex { x: 150, y: 200 },
        ];
        let texcoords = [
            TexCoord { u: 0, v: 0 },
            TexCoord { u: 15, v: 0 },
            TexCoord { u: 7, v: 15 },
        ];
        let info = texture_info();

        // Per PSX-SPX: Values > 128 brighten the texture
        let color = Color {
            r: 255,
            g: 255,
            b: 255,
        };

        gpu.render_textured_triangle(&vertices, &texcoords, &info, &color, false);

        let tri = renderer
            .borrow()
            .last_textured_triangle
            .expect("triangle recorded");
        assert_eq!(tri.color, color);
    }
}
