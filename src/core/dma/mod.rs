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

//! DMA (Direct Memory Access) Controller
//!
//! This module implements the PlayStation's DMA controller, which provides high-speed
//! data transfers between memory and peripherals without CPU intervention.
//!
//! # DMA Channels
//!
//! The PSX has 7 DMA channels, each dedicated to a specific peripheral:
//!
//! | Channel | Device      | Base Address |
//! |---------|-------------|--------------|
//! | 0       | MDEC In     | 0x1F801080   |
//! | 1       | MDEC Out    | 0x1F801090   |
//! | 2       | GPU         | 0x1F8010A0   |
//! | 3       | CD-ROM      | 0x1F8010B0   |
//! | 4       | SPU         | 0x1F8010C0   |
//! | 5       | PIO         | 0x1F8010D0   |
//! | 6       | OTC         | 0x1F8010E0   |
//!
//! # Channel Registers
//!
//! Each channel has three 32-bit registers:
//! - **MADR** (+0x00): Memory address register
//! - **BCR** (+0x04): Block control register
//! - **CHCR** (+0x08): Channel control register
//!
//! # Global Registers
//!
//! - **DPCR** (0x1F8010F0): DMA control register (channel priorities)
//! - **DICR** (0x1F8010F4): DMA interrupt register
//!
//! # Transfer Modes
//!
//! DMA supports three synchronization modes:
//! - **Mode 0** (Immediate): Transfer entire block at once
//! - **Mode 1** (Block): Transfer in blocks with device sync
//! - **Mode 2** (Linked-list): Follow linked list in memory (GPU only)
//!
//! # References
//!
//! - [PSX-SPX: DMA Controller](http://problemkaputt.de/psx-spx.htm#dmacontroller)

/// DMA Controller with 7 channels
///
/// The DMA controller manages data transfers between memory and peripherals,
/// allowing high-speed transfers without CPU intervention.
///
/// # Examples
///
/// ```
/// use psx_core::core::dma::DMA;
///
/// let mut dma = DMA::new();
/// assert_eq!(dma.read_control(), 0x07654321);
/// ```
pub struct DMA {
    /// 7 DMA channels (MDEC In/Out, GPU, CD-ROM, SPU, PIO, OTC)
    channels: [DMAChannel; 7],

    /// DMA Control Register (DPCR) at 0x1F8010F0
    ///
    /// Contains channel priority and enable bits.
    /// Default: 0x07654321 (channel priorities in order)
    control: u32,

    /// DMA Interrupt Register (DICR) at 0x1F8010F4
    ///
    /// Controls interrupt generation and flags for DMA completion.
    interrupt: u32,
}

/// Single DMA channel
///
/// Each channel manages transfers for one specific peripheral device.
#[derive(Clone)]
pub struct DMAChannel {
    /// Memory Address Register (MADR)
    ///
    /// Base address in RAM for the DMA transfer.
    base_address: u32,

    /// Block Control Register (BCR)
    ///
    /// Controls block size and count:
    /// - Bits 0-15: Block size (words)
    /// - Bits 16-31: Block count
    block_control: u32,

    /// Channel Control Register (CHCR)
    ///
    /// Controls transfer direction, sync mode, and activation:
    /// - Bit 0: Direction (0=to RAM, 1=from RAM)
    /// - Bit 1: Address step (0=forward, 1=backward)
    /// - Bit 8: Chopping enable
    /// - Bits 9-10: Sync mode (0=immediate, 1=block, 2=linked-list)
    /// - Bit 24: Start/busy flag
    /// - Bit 28: Manual trigger
    channel_control: u32,

    /// Channel ID (0-6)
    channel_id: u8,
}

impl DMAChannel {
    /// Direction: Device to RAM
    const TRANSFER_TO_RAM: u32 = 0;

    /// Direction: RAM to Device
    const TRANSFER_FROM_RAM: u32 = 1;

    /// Create a new DMA channel
    ///
    /// # Arguments
    ///
    /// * `channel_id` - Channel number (0-6)
    fn new(channel_id: u8) -> Self {
        Self {
            base_address: 0,
            block_control: 0,
            channel_control: 0,
            channel_id,
        }
    }

    /// Check if channel is active (bit 24 of CHCR)
    #[inline(always)]
    pub fn is_active(&self) -> bool {
        (self.channel_control & 0x0100_0000) != 0
    }

    /// Get transfer direction (bit 0 of CHCR)
    ///
    /// Returns 0 for device→RAM, 1 for RAM→device
    #[inline(always)]
    pub fn direction(&self) -> u32 {
        self.channel_control & 1
    }

    /// Get synchronization mode (bits 9-10 of CHCR)
    ///
    /// - 0: Immediate (transfer all at once)
    /// - 1: Block (sync with device)
    /// - 2: Linked-list (GPU only)
    #[inline(always)]
    pub fn sync_mode(&self) -> u32 {
        (self.channel_control >> 9) & 3
    }

    /// Check if manual trigger is enabled (bit 28 of CHCR)
    #[inline(always)]
    pub fn trigger(&self) -> bool {
        (self.channel_control & 0x1000_0000) != 0
    }

    /// Deactivate the channel (clear bit 24 of CHCR)
    fn deactivate(&mut self) {
        log::trace!("DMA channel {} deactivated", self.channel_id);
        self.channel_control &= !0x0100_0000;
    }
}

impl DMA {
    /// Channel 0: MDEC In (compression input)
    #[allow(dead_code)]
    const CH_MDEC_IN: usize = 0;

    /// Channel 1: MDEC Out (decompression output)
    #[allow(dead_code)]
    const CH_MDEC_OUT: usize = 1;

    /// Channel 2: GPU (graphics)
    pub const CH_GPU: usize = 2;

    /// Channel 3: CD-ROM (disc drive)
    pub const CH_CDROM: usize = 3;

    /// Channel 4: SPU (sound)
    pub const CH_SPU: usize = 4;

    /// Channel 5: PIO (expansion port)
    #[allow(dead_code)]
    const CH_PIO: usize = 5;

    /// Channel 6: OTC (ordering table clear)
    pub const CH_OTC: usize = 6;

    /// Create a new DMA controller
    ///
    /// All channels start inactive with default priority ordering.
    ///
    /// # Examples
    ///
    /// ```
    /// use psx_core::core::dma::DMA;
    ///
    /// let dma = DMA::new();
    /// ```
    pub fn new() -> Self {
        Self {
            channels: [
                DMAChannel::new(0),
                DMAChannel::new(1),
                DMAChannel::new(2),
                DMAChannel::new(3),
                DMAChannel::new(4),
                DMAChannel::new(5),
                DMAChannel::new(6),
            ],
            control: 0x0765_4321, // Default channel priority
            interrupt: 0,
        }
    }

    /// Register-shell tick: no transfer engine runs here (see module docs).
    ///
    /// A real DMA engine would walk `active_channels` in priority order and
    /// move words between `ram` and the GPU/CD-ROM/SPU peripherals. That
    /// transfer logic is out of scope for this core (see `DESIGN.md`); games
    /// that depend on DMA-driven VRAM uploads or SPU streaming will stall.
    /// The channel registers below are still fully read/write so BIOS and
    /// game code can program them without faulting.
    pub fn tick(&mut self, _ram: &mut [u8]) -> bool {
        false
    }

    // DPCR and DICR helper methods

    /// Check if a channel is enabled in DPCR
    ///
    /// Each channel's enable bit is bit 3 of its 4-bit nibble in DPCR.
    /// Channel N's nibble is at bits (N*4) to (N*4+3).
    #[inline(always)]
    fn is_channel_enabled(&self, channel: usize) -> bool {
        let shift = channel * 4;
        (self.control & (0x8 << shift)) != 0
    }

    /// Get the priority of a channel from DPCR
    ///
    /// Each channel's priority is bits 0-2 of its 4-bit nibble in DPCR.
    /// Higher values indicate higher priority.
    #[inline(always)]
    fn channel_priority(&self, channel: usize) -> u32 {
        let shift = channel * 4;
        (self.control >> shift) & 0x7
    }

    /// Compute and update DICR master flag (bit 31)
    ///
    /// The master flag determines whether an IRQ should be raised.
    /// It is set when:
    /// - Force flag (bit 15) is set, OR
    /// - Master enable (bit 23) is set AND any channel has both:
    ///   - Channel interrupt enable (bit 16+N) set
    ///   - Channel interrupt flag (bit 24+N) set
    ///
    /// This method should be called after setting/clearing channel flags.
    fn update_master_flag(&mut self) {
        let force = (self.interrupt & (1 << 15)) != 0;
        let master_enable = (self.interrupt & (1 << 23)) != 0;

        let mut any_triggered = false;
        for ch_id in 0..7 {
            let channel_enable = (self.interrupt & (1 << (16 + ch_id))) != 0;
            let channel_flag = (self.interrupt & (1 << (24 + ch_id))) != 0;
            if channel_enable && channel_flag {
                any_triggered = true;
                break;
            }
        }

        let master_flag = force || (master_enable && any_triggered);

        // Set or clear bit 31
        if master_flag {
            self.interrupt |= 1 << 31;
            log::trace!("DICR master flag set (bit 31)");
        } else {
            self.interrupt &= !(1 << 31);
        }
    }

    // Register access methods

    /// Read channel MADR register
    pub fn read_madr(&self, channel: usize) -> u32 {
        self.channels[channel].base_address
    }

    /// Write channel MADR register
    pub fn write_madr(&mut self, channel: usize, value: u32) {
        self.channels[channel].base_address = value & 0x00FF_FFFF;
        log::trace!("DMA{} MADR = 0x{:08X}", channel, value);
    }

    /// Read channel BCR register
    pub fn read_bcr(&self, channel: usize) -> u32 {
        self.channels[channel].block_control
    }

    /// Write channel BCR register
    pub fn write_bcr(&mut self, channel: usize, value: u32) {
        self.channels[channel].block_control = value;
        log::trace!("DMA{} BCR = 0x{:08X}", channel, value);
    }

    /// Read channel CHCR register
    pub fn read_chcr(&self, channel: usize) -> u32 {
        self.channels[channel].channel_control
    }

    /// Write channel CHCR register
    pub fn write_chcr(&mut self, channel: usize, value: u32) {
        self.channels[channel].channel_control = value;
        log::trace!("DMA{} CHCR = 0x{:08X}", channel, value);

        // Log transfer initiation
        if (value & 0x0100_0000) != 0 {
            log::debug!(
                "DMA{} started: addr=0x{:08X} bcr=0x{:08X} mode={}",
                channel,
                self.channels[channel].base_address,
                self.channels[channel].block_control,
                self.channels[channel].sync_mode()
            );
        }
    }

    /// Read DMA Control Register (DPCR)
    pub fn read_control(&self) -> u32 {
        self.control
    }

    /// Write DMA Control Register (DPCR)
    pub fn write_control(&mut self, value: u32) {
        self.control = value;
        log::trace!("DPCR = 0x{:08X}", value);
    }

    /// Read DMA Interrupt Register (DICR)
    pub fn read_interrupt(&self) -> u32 {
        self.interrupt
    }

    /// Write DMA Interrupt Register (DICR)
    pub fn write_interrupt(&mut self, value: u32) {
        // Update writable bits (6-23), preserving reserved bits 0-5
        // Bits 0-5 are always 0, bits 6-23 are writable, bits 24-31 are handled separately
        self.interrupt = (self.interrupt & 0xFF00_0000) | (value & 0x00FF_FFC0);

        // Handle write-1-to-clear for bits 24-30 (interrupt flags)
        let clear_mask = (value >> 24) & 0x7F;
        self.interrupt &= !(clear_mask << 24);

        // Recompute master flag after clearing flags
        self.update_master_flag();

        log::trace!("DICR = 0x{:08X}", self.interrupt);
    }
}

impl Default for DMA {
    fn default() -> Self {
        Self::new()
    }
}
