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

//! Gradient (Gouraud-shaded) rendering implementation
//!
//! Translates gradient GP0 triangle/quad commands into [`Triangle`] values
//! carrying distinct per-vertex colors and forwards them to the renderer.
//! Interpolating those colors across the triangle interior is the
//! renderer's concern, not the GPU front-end's.

use super::super::primitives::{Color, Triangle, Vertex};
use super::super::GPU;

impl GPU {
    /// Render a gradient (Gouraud-shaded) triangle
    ///
    /// Applies the drawing offset to all vertices and forwards the triangle,
    /// with its distinct per-vertex colors, to the renderer.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Array of 3 vertices defining the triangle
    /// * `colors` - Array of 3 colors, one per vertex
    /// * `semi_transparent` - Whether semi-transparency is enabled
    ///
    /// # Notes
    ///
    /// `semi_transparent` is recorded for parity with the command stream but
    /// blending is a renderer-side decision.
    pub(crate) fn render_gradient_triangle(
        &mut self,
        vertices: &[Vertex; 3],
        colors: &[Color; 3],
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
            "Rendering gradient triangle: {:?},{:?},{:?} colors=({},{},{}), ({},{},{}), ({},{},{})",
            v1,
            v2,
            v3,
            colors[0].r,
            colors[0].g,
            colors[0].b,
            colors[1].r,
            colors[1].g,
            colors[1].b,
            colors[2].r,
            colors[2].g,
            colors[2].b
        );

        self.renderer.borrow_mut().draw_triangle(Triangle {
            v1,
            c1: colors[0],
            v2,
            c2: colors[1],
            v3,
            c3: colors[2],
        });
    }

    /// Render a gradient (Gouraud-shaded) quadrilateral
    ///
    /// Renders a quad as two triangles with gradient shading. The quad is
    /// split into triangles (v0, v1, v2) and (v1, v2, v3).
    ///
    /// # Arguments
    ///
    /// * `vertices` - Array of 4 vertices defining the quad
    /// * `colors` - Array of 4 colors, one per vertex
    /// * `semi_transparent` - Whether semi-transparency is enabled
    ///
    /// # Notes
    ///
    /// The quad is rendered as two gradient triangles. Colors are interpolated
    /// independently for each triangle, which may create a visible seam if the
    /// quad is not coplanar in 3D space.
    pub(crate) fn render_gradient_quad(
        &mut self,
        vertices: &[Vertex; 4],
        colors: &[Color; 4],
        semi_transparent: bool,
    ) {
        log::trace!(
            "Rendering {}gradient quad as two triangles",
            if semi_transparent {
                "semi-transparent "
            } else {
                ""
            }
        );

        // Render as two triangles: (v0, v1, v2) and (v1, v2, v3)
        self.render_gradient_triangle(
            &[vertices[0], vertices[1], vertices[2]],
            &[colors[0], colors[1], colors[2]],
            semi_transparent,
        );

        self.render_gradient_triangle(
            &[vertices[1], vertices[2], vertices[3]],
            &[colors[1], colors[2], colors[3]],
            semi_transparent,
        );
    }
}
