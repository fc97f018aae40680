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

//! CD-DA (Red Book audio) mixing stub.
//!
//! Real CD-ROM image reading and audio track playback are out of scope for
//! this core (see `DESIGN.md`): this struct exists only so `core::spu`'s
//! `tick_with_cd` has a CD-audio source to mix, per the narrow interface the
//! SPU expects. It never produces non-silent samples.

/// Side-effect-free stand-in for a CD-DA audio stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct CDAudio {
    #[allow(dead_code)]
    volume_left: u8,
    #[allow(dead_code)]
    volume_right: u8,
}

impl CDAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_volume(&mut self, left: u8, right: u8) {
        self.volume_left = left;
        self.volume_right = right;
    }

    pub fn is_playing(&self) -> bool {
        false
    }

    /// Always silence: no disc image reader backs this stub.
    pub fn get_sample(&mut self) -> (i16, i16) {
        (0, 0)
    }
}
