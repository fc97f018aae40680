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

//! GTE (Geometry Transformation Engine) register file.
//!
//! Coprocessor 2 on real hardware runs fixed-point matrix/vector math for 3D
//! transforms (RTPS, RTPT, NCLIP, colour depth cueing...). That arithmetic is
//! out of scope here; 3D titles that lean on it will compute wrong geometry.
//! What's kept is the part every game's COP2 instructions actually touch
//! from the CPU side: 32 data registers and 32 control registers, addressed
//! by MFC2/CFC2 (read), MTC2/CTC2 (write) and left otherwise untouched by a
//! GTE command opcode.

/// Coprocessor 2 register file.
pub struct GTE {
    data: [i32; 32],
    control: [i32; 32],
}

impl GTE {
    /// Create a new GTE instance with all registers cleared.
    pub fn new() -> Self {
        Self {
            data: [0; 32],
            control: [0; 32],
        }
    }

    /// Reset all registers to 0.
    pub fn reset(&mut self) {
        self.data = [0; 32];
        self.control = [0; 32];
    }

    /// Read from data register (MFC2).
    #[inline(always)]
    pub fn read_data(&self, index: usize) -> i32 {
        self.data[index]
    }

    /// Write to data register (MTC2).
    #[inline(always)]
    pub fn write_data(&mut self, index: usize, value: i32) {
        self.data[index] = value;
    }

    /// Read from control register (CFC2).
    #[inline(always)]
    pub fn read_control(&self, index: usize) -> i32 {
        self.control[index]
    }

    /// Write to control register (CTC2).
    #[inline(always)]
    pub fn write_control(&mut self, index: usize, value: i32) {
        self.control[index] = value;
    }

    /// Execute a GTE command opcode (RTPS, RTPT, NCLIP, MVMVA, ...).
    ///
    /// No transform is computed; this only logs the attempt so a game using
    /// 3D geometry is visibly flagged rather than silently hanging.
    pub fn execute(&mut self, command: u32) {
        log::trace!("GTE command 0x{:06X} (no-op: GTE arithmetic not implemented)", command & 0x1FF_FFFF);
    }
}

impl Default for GTE {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clears_all_registers() {
        let gte = GTE::new();
        for i in 0..32 {
            assert_eq!(gte.read_data(i), 0);
            assert_eq!(gte.read_control(i), 0);
        }
    }

    #[test]
    fn data_register_round_trip() {
        let mut gte = GTE::new();
        gte.write_data(15, 0x1234_5678);
        assert_eq!(gte.read_data(15), 0x1234_5678);
    }

    #[test]
    fn control_register_round_trip() {
        let mut gte = GTE::new();
        gte.write_control(26, -100);
        assert_eq!(gte.read_control(26), -100);
    }

    #[test]
    fn reset_clears_registers_written_before() {
        let mut gte = GTE::new();
        gte.write_data(0, 42);
        gte.write_control(0, 42);
        gte.reset();
        assert_eq!(gte.read_data(0), 0);
        assert_eq!(gte.read_control(0), 0);
    }

    #[test]
    fn execute_does_not_panic_and_leaves_registers_untouched() {
        let mut gte = GTE::new();
        gte.write_data(0, 7);
        gte.execute(0x0180_0012); // RTPS opcode encoding
        assert_eq!(gte.read_data(0), 7);
    }
}
