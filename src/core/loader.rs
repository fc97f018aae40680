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

//! PSX-EXE sideload parsing.
//!
//! A PSX-EXE is a flat 2 KiB header followed by the raw program image. This
//! core does not read a disc image or parse SYSTEM.CNF (see `core::cdrom`
//! docs): the host harness loads a `.exe` file directly and the core stages
//! it for injection once the BIOS shell reaches its sideload hook, per
//! spec.md §6.

use super::error::{EmulatorError, Result};

/// Size of the PSX-EXE header, in bytes.
const HEADER_SIZE: usize = 0x800;

/// Magic string at the start of every PSX-EXE header.
const MAGIC: &[u8; 8] = b"PS-X EXE";

/// A parsed PSX-EXE image, ready to be written into RAM.
#[derive(Debug, Clone)]
pub struct PsxExecutable {
    /// Initial PC (header offset 0x10).
    pub pc: u32,
    /// Initial $gp (header offset 0x14).
    pub gp: u32,
    /// Destination address in RAM (header offset 0x18).
    pub load_address: u32,
    /// Size of the program image in bytes (header offset 0x1C).
    pub size: u32,
    /// Initial stack base (header offset 0x30); 0 if the header doesn't set one.
    pub stack_base: u32,
    /// Stack offset to add to `stack_base` (header offset 0x34).
    pub stack_offset: u32,
    /// Raw program image, to be written starting at `load_address`.
    pub data: Vec<u8>,
}

impl PsxExecutable {
    /// Parse a PSX-EXE file already read into memory.
    ///
    /// Validates the 8-byte magic and that the buffer is at least as long
    /// as the header plus the declared program size; trailing padding past
    /// `size` bytes (the file is often padded to a sector boundary) is
    /// ignored.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(EmulatorError::InvalidExecutable(format!(
                "file too short to hold a PSX-EXE header: {} bytes",
                bytes.len()
            )));
        }
        if &bytes[0..8] != MAGIC {
            return Err(EmulatorError::InvalidExecutable(
                "missing \"PS-X EXE\" magic".to_string(),
            ));
        }

        let read_u32 = |offset: usize| -> u32 {
            u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
        };

        let pc = read_u32(0x10);
        let gp = read_u32(0x14);
        let load_address = read_u32(0x18);
        let size = read_u32(0x1C);
        let stack_base = read_u32(0x30);
        let stack_offset = read_u32(0x34);

        let body_end = HEADER_SIZE
            .checked_add(size as usize)
            .ok_or_else(|| EmulatorError::InvalidExecutable("size overflow".to_string()))?;
        if bytes.len() < body_end {
            return Err(EmulatorError::InvalidExecutable(format!(
                "header declares {} byte body but file only has {} bytes after the header",
                size,
                bytes.len() - HEADER_SIZE
            )));
        }

        Ok(Self {
            pc,
            gp,
            load_address,
            size,
            stack_base,
            stack_offset,
            data: bytes[HEADER_SIZE..body_end].to_vec(),
        })
    }

    /// Read and parse a PSX-EXE file from disk.
    pub fn load(path: &str) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| EmulatorError::ImageLoad {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&bytes)
    }

    /// Initial stack pointer: `stack_base + stack_offset`, falling back to
    /// the BIOS's own default user stack top when the header carries no
    /// stack information.
    pub fn initial_sp(&self) -> u32 {
        if self.stack_base != 0 {
            self.stack_base.wrapping_add(self.stack_offset)
        } else {
            0x801F_FFF0
        }
    }
}
