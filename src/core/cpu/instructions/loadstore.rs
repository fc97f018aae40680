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

//! Load/store instructions.
//!
//! Address errors (unaligned halfword/word access) are checked up front and
//! turned into `AddressErrorLoad`/`AddressErrorStore` exceptions before the
//! bus is ever touched. A bus miss the decode table itself can't route
//! (`EmulatorError::InvalidMemoryAccess`) is turned into a bus error
//! exception instead of propagating, per `crate::core::error`'s contract.

use super::super::{ExceptionCause, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    fn effective_address(&self, instruction: u32, rs: u8) -> u32 {
        let imm = (instruction & 0xFFFF) as u16 as i16 as i32;
        self.reg(rs).wrapping_add(imm as u32)
    }

    /// Read a byte, turning an unroutable address into a bus error exception.
    fn load8(&mut self, bus: &Bus, address: u32) -> Option<u8> {
        match bus.read8(address) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cop0_set_bad_address(address);
                self.exception(ExceptionCause::BusErrorData);
                None
            }
        }
    }

    fn load16(&mut self, bus: &Bus, address: u32) -> Option<u16> {
        if address & 0x1 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorLoad);
            return None;
        }
        match bus.read16(address) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cop0_set_bad_address(address);
                self.exception(ExceptionCause::BusErrorData);
                None
            }
        }
    }

    fn load32(&mut self, bus: &Bus, address: u32) -> Option<u32> {
        if address & 0x3 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorLoad);
            return None;
        }
        match bus.read32(address) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cop0_set_bad_address(address);
                self.exception(ExceptionCause::BusErrorData);
                None
            }
        }
    }

    /// Unaligned word read used by LWL/LWR: aligns down and reads through,
    /// so only the bus-miss case (not alignment) can fail here.
    fn load32_aligned_down(&mut self, bus: &Bus, address: u32) -> Option<u32> {
        match bus.read32(address & !0x3) {
            Ok(value) => Some(value),
            Err(_) => {
                self.cop0_set_bad_address(address);
                self.exception(ExceptionCause::BusErrorData);
                None
            }
        }
    }

    fn store8(&mut self, bus: &mut Bus, address: u32, value: u8) {
        if bus.write8(address, value).is_err() {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::BusErrorData);
        }
    }

    fn store16(&mut self, bus: &mut Bus, address: u32, value: u16) {
        if address & 0x1 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorStore);
            return;
        }
        if bus.write16(address, value).is_err() {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::BusErrorData);
        }
    }

    fn store32(&mut self, bus: &mut Bus, address: u32, value: u32) {
        if address & 0x3 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorStore);
            return;
        }
        if bus.write32(address, value).is_err() {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::BusErrorData);
        }
    }

    fn store32_aligned_down(&mut self, bus: &mut Bus, address: u32, value: u32) {
        if bus.write32(address & !0x3, value).is_err() {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::BusErrorData);
        }
    }

    /// LB: Load Byte (sign-extended)
    pub(crate) fn op_lb(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        if let Some(value) = self.load8(bus, address) {
            self.set_reg_delayed(rt, value as i8 as u32);
        }
        Ok(())
    }

    /// LBU: Load Byte Unsigned
    pub(crate) fn op_lbu(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        if let Some(value) = self.load8(bus, address) {
            self.set_reg_delayed(rt, value as u32);
        }
        Ok(())
    }

    /// LH: Load Halfword (sign-extended)
    pub(crate) fn op_lh(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        if let Some(value) = self.load16(bus, address) {
            self.set_reg_delayed(rt, value as i16 as u32);
        }
        Ok(())
    }

    /// LHU: Load Halfword Unsigned
    pub(crate) fn op_lhu(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        if let Some(value) = self.load16(bus, address) {
            self.set_reg_delayed(rt, value as u32);
        }
        Ok(())
    }

    /// LW: Load Word
    pub(crate) fn op_lw(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        if let Some(value) = self.load32(bus, address) {
            self.set_reg_delayed(rt, value);
        }
        Ok(())
    }

    /// LWL: Load Word Left. Merges the high-order bytes of an unaligned word
    /// into whatever rt currently holds (including its own pending load
    /// delay value, since LWL/LWR are the one pair of loads MIPS allows to
    /// read back a load still in its delay slot).
    pub(crate) fn op_lwl(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let existing = self.reg_for_lwl_lwr(rt);

        if let Some(word) = self.load32_aligned_down(bus, address) {
            let shift = 8 * ((address & 0x3) ^ 0x3);
            let mask: u32 = 0xFFFF_FFFF_u32.checked_shl(shift).unwrap_or(0);
            let new_value = (existing & !mask) | (word << shift);
            self.set_reg_delayed(rt, new_value);
        }
        Ok(())
    }

    /// LWR: Load Word Right. See [`Self::op_lwl`].
    pub(crate) fn op_lwr(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let existing = self.reg_for_lwl_lwr(rt);

        if let Some(word) = self.load32_aligned_down(bus, address) {
            let shift = 8 * (address & 0x3);
            let mask: u32 = 0xFFFF_FFFF_u32.checked_shr(shift).unwrap_or(0);
            let new_value = (existing & !mask) | (word >> shift);
            self.set_reg_delayed(rt, new_value);
        }
        Ok(())
    }

    /// SB: Store Byte
    pub(crate) fn op_sb(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let value = self.reg(rt) as u8;
        self.store8(bus, address, value);
        Ok(())
    }

    /// SH: Store Halfword
    pub(crate) fn op_sh(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let value = self.reg(rt) as u16;
        self.store16(bus, address, value);
        Ok(())
    }

    /// SW: Store Word
    pub(crate) fn op_sw(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let value = self.reg(rt);
        self.store32(bus, address, value);
        Ok(())
    }

    /// SWL: Store Word Left
    pub(crate) fn op_swl(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let register_word = self.reg(rt);

        if let Some(existing) = self.load32_aligned_down(bus, address) {
            let shift = 8 * ((address & 0x3) ^ 0x3);
            let mask: u32 = 0xFFFF_FFFF_u32.checked_shr(shift).unwrap_or(0);
            let new_value = (existing & !mask) | (register_word >> shift);
            self.store32_aligned_down(bus, address, new_value);
        }
        Ok(())
    }

    /// SWR: Store Word Right
    pub(crate) fn op_swr(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let address = self.effective_address(instruction, rs);
        let register_word = self.reg(rt);

        if let Some(existing) = self.load32_aligned_down(bus, address) {
            let shift = 8 * (address & 0x3);
            let mask: u32 = 0xFFFF_FFFF_u32.checked_shl(shift).unwrap_or(0);
            let new_value = (existing & !mask) | (register_word << shift);
            self.store32_aligned_down(bus, address, new_value);
        }
        Ok(())
    }
}
