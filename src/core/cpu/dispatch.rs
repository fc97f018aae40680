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

//! Opcode dispatch: primary opcode (bits 31:26), then the SPECIAL funct
//! field (bits 5:0) or a coprocessor's rs sub-field (bits 25:21) where the
//! primary opcode alone doesn't pick a single instruction. REGIMM (opcode
//! 0x01, BLTZ/BGEZ/BLTZAL/BGEZAL) is fully handled by a single handler
//! since all four share one encoding shape; see `instructions::branch`.
//!
//! Unmapped encodings raise `ReservedInstruction` rather than panicking —
//! a game stepping off the end of its code, or a disassembler fed garbage,
//! should fault the same way real hardware does.

use super::{ExceptionCause, CPU};
use crate::core::error::Result;
use crate::core::memory::Bus;

impl CPU {
    /// Decode and execute the instruction latched in `current_instruction`.
    pub(super) fn execute_instruction(&mut self, bus: &mut Bus) -> Result<()> {
        let instruction = self.current_instruction;
        let opcode = (instruction >> 26) & 0x3F;

        let result = self.dispatch_opcode(opcode, instruction, bus);

        // SR may have just been written by MTC0 (or restored by RFE/an
        // exception); keep the bus's isolate-cache mirror in sync either way.
        bus.set_isolate_cache(self.sr_isolate_cache());

        result
    }

    fn dispatch_opcode(&mut self, opcode: u32, instruction: u32, bus: &mut Bus) -> Result<()> {
        match opcode {
            0x00 => self.execute_special(instruction),
            0x01 => self.execute_bcondz(instruction),
            0x02 => self.op_j(instruction),
            0x03 => self.op_jal(instruction),
            0x04 => self.op_beq(instruction),
            0x05 => self.op_bne(instruction),
            0x06 => self.op_blez(instruction),
            0x07 => self.op_bgtz(instruction),
            0x08 => self.op_addi(instruction),
            0x09 => self.op_addiu(instruction),
            0x0A => self.op_slti(instruction),
            0x0B => self.op_sltiu(instruction),
            0x0C => self.op_andi(instruction),
            0x0D => self.op_ori(instruction),
            0x0E => self.op_xori(instruction),
            0x0F => self.op_lui(instruction),
            0x10 => self.execute_cop0(instruction),
            0x11 => {
                self.exception(ExceptionCause::CoprocessorUnusable);
                Ok(())
            }
            0x12 => self.execute_cop2(instruction),
            0x13 => {
                self.exception(ExceptionCause::CoprocessorUnusable);
                Ok(())
            }
            0x20 => self.op_lb(bus, instruction),
            0x21 => self.op_lh(bus, instruction),
            0x22 => self.op_lwl(bus, instruction),
            0x23 => self.op_lw(bus, instruction),
            0x24 => self.op_lbu(bus, instruction),
            0x25 => self.op_lhu(bus, instruction),
            0x26 => self.op_lwr(bus, instruction),
            0x28 => self.op_sb(bus, instruction),
            0x29 => self.op_sh(bus, instruction),
            0x2A => self.op_swl(bus, instruction),
            0x2B => self.op_sw(bus, instruction),
            0x2E => self.op_swr(bus, instruction),
            0x32 => self.op_lwc2(bus, instruction),
            0x3A => self.op_swc2(bus, instruction),
            0x30 | 0x31 | 0x33 | 0x38 | 0x39 | 0x3B => {
                // LWC0/1/3, SWC0/1/3: no such coprocessor on this machine.
                self.exception(ExceptionCause::CoprocessorUnusable);
                Ok(())
            }
            _ => {
                self.exception(ExceptionCause::ReservedInstruction);
                Ok(())
            }
        }
    }

    fn execute_special(&mut self, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = ((instruction >> 16) & 0x1F) as u8;
        let rd = ((instruction >> 11) & 0x1F) as u8;
        let shamt = ((instruction >> 6) & 0x1F) as u8;
        let funct = instruction & 0x3F;

        match funct {
            0x00 => self.op_sll(rt, rd, shamt),
            0x02 => self.op_srl(rt, rd, shamt),
            0x03 => self.op_sra(rt, rd, shamt),
            0x04 => self.op_sllv(rs, rt, rd),
            0x06 => self.op_srlv(rs, rt, rd),
            0x07 => self.op_srav(rs, rt, rd),
            0x08 => self.op_jr(rs),
            0x09 => self.op_jalr(rs, rd),
            0x0C => self.op_syscall(instruction),
            0x0D => self.op_break(instruction),
            0x10 => self.op_mfhi(rd),
            0x11 => self.op_mthi(rs),
            0x12 => self.op_mflo(rd),
            0x13 => self.op_mtlo(rs),
            0x18 => self.op_mult(rs, rt),
            0x19 => self.op_multu(rs, rt),
            0x1A => self.op_div(rs, rt),
            0x1B => self.op_divu(rs, rt),
            0x20 => self.op_add(rs, rt, rd),
            0x21 => self.op_addu(rs, rt, rd),
            0x22 => self.op_sub(rs, rt, rd),
            0x23 => self.op_subu(rs, rt, rd),
            0x24 => self.op_and(rs, rt, rd),
            0x25 => self.op_or(rs, rt, rd),
            0x26 => self.op_xor(rs, rt, rd),
            0x27 => self.op_nor(rs, rt, rd),
            0x2A => self.op_slt(rs, rt, rd),
            0x2B => self.op_sltu(rs, rt, rd),
            _ => {
                self.exception(ExceptionCause::ReservedInstruction);
                Ok(())
            }
        }
    }

    fn execute_cop0(&mut self, instruction: u32) -> Result<()> {
        let rs = (instruction >> 21) & 0x1F;
        match rs {
            0x00 => self.op_mfc0(instruction),
            0x04 => self.op_mtc0(instruction),
            0x10 => {
                // CO format: funct field selects the COP0 operation.
                match instruction & 0x3F {
                    0x10 => self.op_rfe(instruction),
                    _ => {
                        self.exception(ExceptionCause::ReservedInstruction);
                        Ok(())
                    }
                }
            }
            _ => {
                self.exception(ExceptionCause::ReservedInstruction);
                Ok(())
            }
        }
    }

    fn execute_cop2(&mut self, instruction: u32) -> Result<()> {
        let rs = (instruction >> 21) & 0x1F;
        match rs {
            0x00 => self.op_mfc2(instruction),
            0x02 => self.op_cfc2(instruction),
            0x04 => self.op_mtc2(instruction),
            0x06 => self.op_ctc2(instruction),
            0x10..=0x1F => self.op_cop2_command(instruction),
            _ => {
                self.exception(ExceptionCause::ReservedInstruction);
                Ok(())
            }
        }
    }

    /// LWC2: Load Word to Coprocessor 2 data register.
    fn op_lwc2(&mut self, bus: &Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = (instruction >> 16) & 0x1F;
        let imm = (instruction & 0xFFFF) as u16 as i16 as i32;
        let address = self.reg(rs).wrapping_add(imm as u32);

        if address & 0x3 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorLoad);
            return Ok(());
        }

        match bus.read32(address) {
            Ok(value) => self.gte.write_data(rt as usize, value as i32),
            Err(_) => {
                self.cop0_set_bad_address(address);
                self.exception(ExceptionCause::BusErrorData);
            }
        }
        Ok(())
    }

    /// SWC2: Store Word from Coprocessor 2 data register.
    fn op_swc2(&mut self, bus: &mut Bus, instruction: u32) -> Result<()> {
        let rs = ((instruction >> 21) & 0x1F) as u8;
        let rt = (instruction >> 16) & 0x1F;
        let imm = (instruction & 0xFFFF) as u16 as i16 as i32;
        let address = self.reg(rs).wrapping_add(imm as u32);

        if address & 0x3 != 0 {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::AddressErrorStore);
            return Ok(());
        }

        let value = self.gte.read_data(rt as usize) as u32;
        if bus.write32(address, value).is_err() {
            self.cop0_set_bad_address(address);
            self.exception(ExceptionCause::BusErrorData);
        }
        Ok(())
    }
}
