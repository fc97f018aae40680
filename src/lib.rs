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

//! psx-core: the fetch-execute-interrupt core of a PlayStation 1 emulator
//!
//! This crate implements the tightly coupled real-time simulation at the
//! centre of a PSX emulator: the MIPS R3000A CPU and its coprocessor 0, the
//! segmented memory bus, the interrupt controller, the three programmable
//! timers, and the GPU command-processing front-end (FIFO, GP0/GP1 dispatch,
//! VRAM transfer state machine, video timing).
//!
//! # Out of scope
//!
//! The host windowing system, a concrete rasterisation backend, a
//! disassembler/debugger UI, BIOS/CD-ROM file tooling beyond raw ingestion,
//! controller input mapping, SPU audio synthesis, and MDEC video decoding are
//! all treated as narrow, replaceable collaborators (see [`core::renderer`])
//! or side-effect-free stubs (see [`core::spu`], [`core::cdrom`],
//! [`core::gte`]).
//!
//! # Example
//!
//! ```no_run
//! use psx_core::core::system::Core;
//! use psx_core::core::renderer::NullRenderer;
//!
//! let mut core = Core::with_renderer(NullRenderer::default());
//! // core.load_bios("path/to/bios.bin")?;
//! // core.run()?;
//! # Ok::<(), psx_core::core::error::EmulatorError>(())
//! ```
//!
//! # Modules
//!
//! - [`core::cpu`]: MIPS R3000A CPU, CP0, delay-slot pipeline, exceptions
//! - [`core::memory`]: memory bus, address decoder, RAM/scratchpad/BIOS
//! - [`core::interrupt`]: I_STAT/I_MASK edge-latching interrupt controller
//! - [`core::timer`]: the three programmable timers
//! - [`core::gpu`]: GP0/GP1 command front-end and video timing
//! - [`core::system`]: the top-level [`core::system::Core`] driver
//! - [`core::renderer`]: the narrow external rendering collaborator contract
//!
//! # Error handling
//!
//! All fallible operations return [`core::error::Result<T>`], an alias for
//! `Result<T, core::error::EmulatorError>`.

pub mod core;

// Re-export commonly used types
pub use core::error::{EmulatorError, Result};
