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

//! CD-ROM controller register shell.
//!
//! Real disc image reading, seek/read state machines and XA-ADPCM decoding
//! are out of scope for this core (spec Non-goals: "real CD-ROM image
//! reading"). Per the unimplemented-peripherals contract, this module still
//! presents the full register interface the BIOS probes at boot — index
//! select, parameter/response FIFOs, and the interrupt flag/enable pair — so
//! the boot shell's CD-ROM init sequence runs to completion instead of
//! faulting. Every command is acknowledged with a generic error response
//! rather than executed.
//!
//! # Register map
//!
//! | Address      | Index | Read                  | Write              |
//! |--------------|-------|-----------------------|--------------------|
//! | 0x1F801800   | -     | Status register       | Index select       |
//! | 0x1F801801   | 0-3   | Response FIFO          | Command register   |
//! | 0x1F801802   | 0,2   | Interrupt flag         | Parameter FIFO      |
//! | 0x1F801802   | 1,3   | Interrupt enable       | (same)              |
//! | 0x1F801803   | 0     | Interrupt enable       | Request register    |
//! | 0x1F801803   | 1     | Interrupt flag         | Interrupt enable    |

use std::collections::VecDeque;

pub mod cd_audio;

pub use cd_audio::CDAudio;

/// CD-ROM drive controller register shell.
pub struct CDROM {
    /// Parameter FIFO (up to 16 bytes), drained by `execute_command`.
    param_fifo: VecDeque<u8>,

    /// Response FIFO (up to 16 bytes), read back via `pop_response`.
    response_fifo: VecDeque<u8>,

    /// Interrupt flag (bits 0-4 correspond to INT1-INT5).
    interrupt_flag: u8,

    /// Interrupt enable mask.
    interrupt_enable: u8,

    /// Current index/status register select (0-3).
    index: u8,

    /// CD-DA mixing stub consumed by `core::spu::SPU::tick_with_cd`.
    pub(crate) cd_audio: CDAudio,
}

impl CDROM {
    /// CD-ROM register addresses.
    pub const REG_INDEX: u32 = 0x1F801800;
    pub const REG_DATA: u32 = 0x1F801801;
    pub const REG_INT_FLAG: u32 = 0x1F801802;
    pub const REG_INT_ENABLE: u32 = 0x1F801803;

    /// Maximum FIFO size (16 bytes), matching the real controller.
    const FIFO_SIZE: usize = 16;

    /// Generic "error" interrupt level returned for every command, since no
    /// command is actually executed.
    const INT_ERROR: u8 = 0x05;

    pub fn new() -> Self {
        Self {
            param_fifo: VecDeque::new(),
            response_fifo: VecDeque::new(),
            interrupt_flag: 0,
            interrupt_enable: 0,
            index: 0,
            cd_audio: CDAudio::new(),
        }
    }

    /// Current index register select (bits 0-1 of the index/status byte).
    pub fn index(&self) -> u8 {
        self.index & 0x03
    }

    /// Write the index/status register (0x1F801800).
    pub fn set_index(&mut self, value: u8) {
        self.index = value & 0x03;
        log::trace!("CD-ROM: index set to {}", self.index);
    }

    /// Status register read (0x1F801800).
    ///
    /// Bit layout: 0-1 index, 3 parameter FIFO empty, 4 parameter FIFO not
    /// full, 5 response FIFO not empty. Bits 2 (XA-ADPCM FIFO), 6 (data FIFO)
    /// and 7 (command busy) are always clear — there is no sector data to
    /// report.
    pub fn read_status(&self) -> u8 {
        let mut value = self.index;
        if self.param_fifo.is_empty() {
            value |= 1 << 3;
        }
        if self.param_fifo.len() < Self::FIFO_SIZE {
            value |= 1 << 4;
        }
        if !self.response_fifo.is_empty() {
            value |= 1 << 5;
        }
        value
    }

    /// Push a parameter byte to the parameter FIFO (indices 1-3 of 0x1F801801).
    pub fn push_param(&mut self, value: u8) {
        if self.param_fifo.len() < Self::FIFO_SIZE {
            self.param_fifo.push_back(value);
            log::trace!("CD-ROM: pushed parameter 0x{:02X}", value);
        } else {
            log::warn!("CD-ROM: parameter FIFO overflow, byte 0x{:02X} dropped", value);
        }
    }

    /// Pop a response byte from the response FIFO (index 0-3 reads of
    /// 0x1F801801). Returns `None` once the FIFO is drained.
    pub fn pop_response(&mut self) -> Option<u8> {
        self.response_fifo.pop_front()
    }

    /// `true` once every queued response byte has been read.
    pub fn response_empty(&self) -> bool {
        self.response_fifo.is_empty()
    }

    /// Current interrupt flag (INT1-INT5 in bits 0-4).
    pub fn interrupt_flag(&self) -> u8 {
        self.interrupt_flag
    }

    /// Current interrupt enable mask.
    pub fn interrupt_enable(&self) -> u8 {
        self.interrupt_enable
    }

    /// Acknowledge (clear) the interrupt bits named by `value`, and drop any
    /// stale parameters left in the FIFO — matches real hardware behavior on
    /// interrupt ack.
    pub fn acknowledge_interrupt(&mut self, value: u8) {
        self.interrupt_flag &= !(value & 0x1F);
        self.param_fifo.clear();
        log::trace!("CD-ROM: acknowledged interrupts 0x{:02X}", value);
    }

    /// Set the interrupt enable mask (only bits 0-4 carry meaning).
    pub fn set_interrupt_enable(&mut self, value: u8) {
        self.interrupt_enable = value & 0x1F;
        log::trace!("CD-ROM: interrupt enable = 0x{:02X}", self.interrupt_enable);
    }

    /// Execute a command byte.
    ///
    /// No command is actually carried out — there is no disc image to read.
    /// Every command drains its parameters, clears the response FIFO, and
    /// queues a minimal two-byte error response (status byte with the error
    /// bit set, followed by a generic "unknown command" error code), raising
    /// INT5 if enabled. This mirrors how BIOS init code treats a CD-ROM
    /// drive with the tray open or no disc present: it logs the failure and
    /// continues rather than hanging.
    pub fn execute_command(&mut self, command: u8) {
        log::warn!(
            "CD-ROM: command 0x{:02X} is unimplemented in this core; returning a generic error",
            command
        );
        self.param_fifo.clear();
        self.response_fifo.clear();
        self.response_fifo.push_back(0x11); // status byte, error bit set
        self.response_fifo.push_back(0x40); // error code: unknown command
        self.interrupt_flag = Self::INT_ERROR;
    }

    /// No-op tick: there is no read/seek state machine to advance.
    pub fn tick(&mut self, _cpu_cycles: u32) {}

    /// No timing events to register: this stub has no seek/read state
    /// machine to drive, unlike the GPU's VBlank/HBlank events or the
    /// timers' overflow/target events.
    pub fn register_events(&mut self, _timing: &mut super::timing::TimingEventManager) {}

    /// No timing events to process, for the same reason.
    pub fn process_events(
        &mut self,
        _timing: &mut super::timing::TimingEventManager,
        _triggered_events: &[super::timing::EventHandle],
    ) {
    }
}

impl Default for CDROM {
    fn default() -> Self {
        Self::new()
    }
}
