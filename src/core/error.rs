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

//! Crate-wide error type.
//!
//! Most faults inside the emulated machine (bus misses, reserved opcodes,
//! unaligned loads) are not Rust errors at all — they are CPU exceptions,
//! handled entirely inside [`crate::core::cpu`] via `CPU::generate_exception`.
//! The [`EmulatorError`] type here is reserved for faults that have no
//! architectural recovery path: a GPU command the front-end cannot decode, or
//! I/O failure while loading a BIOS/EXE image at startup.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum EmulatorError {
    /// A virtual address did not match any entry in the bus decode table.
    ///
    /// This is only raised for addresses the bus itself cannot route (see
    /// `Bus::read8`/`write8` and friends); within the CPU this is turned
    /// into a bus error exception (`ExceptionCause::BusErrorData`/
    /// `BusErrorInstruction`) rather than propagated as an `Err`.
    #[error("invalid memory access at 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    /// A 16-bit or 32-bit access was not naturally aligned.
    ///
    /// Turned into `ExceptionCause::AddressErrorLoad`/`AddressErrorStore`
    /// by the CPU rather than propagated.
    #[error("unaligned {size}-byte access at 0x{address:08X}")]
    UnalignedAccess { address: u32, size: u8 },

    /// GP0/GP1 dispatch missed: an opcode with no table entry.
    ///
    /// An unknown GPU command is fatal for this core — the renderer
    /// cannot continue safely once the GPU's view of VRAM state diverges
    /// from the game's expectations.
    #[error("unknown GPU command: GP{family} opcode 0x{opcode:02X}")]
    UnknownGpuCommand {
        /// 0 for GP0, 1 for GP1.
        family: u8,
        opcode: u8,
    },

    /// BIOS image file could not be opened.
    #[error("BIOS image not found: {0}")]
    BiosNotFound(String),

    /// A BIOS image was the wrong size (must be exactly 512 KiB).
    #[error("bad BIOS image size: expected {expected} bytes, got {got}")]
    InvalidBiosSize { expected: usize, got: usize },

    /// BIOS or sideloaded PSX-EXE could not be read.
    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A sideloaded PSX-EXE failed to parse (bad magic, truncated body).
    #[error("invalid PSX-EXE: {0}")]
    InvalidExecutable(String),

    /// An internal invariant was violated (e.g. register index >= 32).
    ///
    /// Should never trigger during steady-state emulation; reserved for
    /// programming errors, not emulated-machine conditions.
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl From<std::io::Error> for EmulatorError {
    fn from(source: std::io::Error) -> Self {
        EmulatorError::ImageLoad {
            path: "<unknown>".to_string(),
            source,
        }
    }
}
