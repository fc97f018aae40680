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

//! Core integration module
//!
//! This module ties together all emulator components (CPU, Memory, GPU, SPU, Controller)
//! and provides the main emulation loop.

mod controller_ports;

pub use controller_ports::ControllerPorts;

use super::cdrom::CDROM;
use super::cpu::{CpuTracer, CPU};
use super::dma::DMA;
use super::error::{EmulatorError, Result};
use super::gpu::GPU;
use super::interrupt::{interrupts, InterruptController};
use super::memory::Bus;
use super::spu::SPU;
use super::timer::Timers;
use super::timing::TimingEventManager;
use std::cell::RefCell;
use std::rc::Rc;

/// PlayStation Core
///
/// Integrates all hardware components and manages the emulation loop.
///
/// # Components
/// - CPU: MIPS R3000A processor
/// - Bus: Memory bus for RAM, BIOS, and I/O
/// - GPU: Graphics processing unit
/// - SPU: Sound processing unit
/// - Audio: Audio output backend
/// - DMA: Direct Memory Access controller
/// - Controller Ports: Input device interface
/// - Timers: 3 timer/counter channels
///
/// # Example
/// ```no_run
/// use psx_core::core::system::Core;
///
/// let mut system = Core::new();
/// // system.load_bios("path/to/bios.bin")?;
/// // system.run();
/// ```
pub struct Core {
    /// CPU instance
    cpu: CPU,
    /// Memory bus
    bus: Bus,
    /// Timing event manager
    timing: TimingEventManager,
    /// GPU instance (shared via Rc<RefCell> for memory-mapped access)
    gpu: Rc<RefCell<GPU>>,
    /// SPU instance (shared via Rc<RefCell> for memory-mapped access)
    spu: Rc<RefCell<SPU>>,
    /// DMA controller (shared via Rc<RefCell> for memory-mapped access)
    dma: Rc<RefCell<DMA>>,
    /// CDROM drive (shared via Rc<RefCell> for memory-mapped access)
    cdrom: Rc<RefCell<CDROM>>,
    /// Controller ports (shared via Rc<RefCell> for memory-mapped access)
    controller_ports: Rc<RefCell<ControllerPorts>>,
    /// Timers (shared via Rc<RefCell> for memory-mapped access)
    timers: Rc<RefCell<Timers>>,
    /// Interrupt controller (shared via Rc<RefCell> for memory-mapped access)
    interrupt_controller: Rc<RefCell<InterruptController>>,
    /// Total cycles executed
    cycles: u64,
    /// Running state
    running: bool,
    /// CPU tracer for debugging (optional)
    tracer: Option<CpuTracer>,
    /// Maximum instructions to trace (0 = unlimited)
    trace_limit: usize,
    /// Number of instructions traced so far
    trace_count: usize,
    /// Cycles at last VBLANK
    last_vblank_cycles: u64,
    /// Number of VBlanks seen so far, for the harness's progress log line.
    vblank_count: u64,
    /// When set, suppresses the per-VBlank progress log line, for the
    /// stretch of frames before a sideloaded EXE takes over (or for BIOS-only
    /// runs where the splash/shell animation is uninteresting to watch).
    /// Mirrors [`Config::skip_bios_animation`](super::config::Config).
    skip_bios_animation: bool,
    /// A parsed PSX-EXE staged by `load_executable`, injected into RAM once
    /// the CPU reaches the BIOS shell's sideload hook.
    pending_exe: Option<super::loader::PsxExecutable>,
}

impl Core {
    /// Create a new Core instance
    ///
    /// Initializes all hardware components to their reset state.
    /// Sets up memory-mapped I/O connections between components.
    /// Registers timing events for all components.
    ///
    /// # Returns
    /// Initialized Core instance
    pub fn new() -> Self {
        Self::with_renderer(super::renderer::BufferRenderer::new())
    }

    /// Create a new Core instance driving the given [`Renderer`](super::renderer::Renderer).
    ///
    /// This is how a host harness plugs in its own rasterization backend
    /// (or a [`NullRenderer`](super::renderer::NullRenderer) for headless
    /// use): the GPU front-end forwards every pixel-level operation to it
    /// and otherwise never touches pixels directly.
    pub fn with_renderer<R: super::renderer::Renderer + 'static>(renderer: R) -> Self {
        // Create GPU wrapped in Rc<RefCell> for shared access
        let gpu = Rc::new(RefCell::new(GPU::with_renderer(Rc::new(RefCell::new(
            renderer,
        )))));

        // Create DMA controller wrapped in Rc<RefCell> for shared access
        let dma = Rc::new(RefCell::new(DMA::new()));

        // Create CDROM wrapped in Rc<RefCell> for shared access
        let cdrom = Rc::new(RefCell::new(CDROM::new()));

        // Create ControllerPorts wrapped in Rc<RefCell> for shared access
        let controller_ports = Rc::new(RefCell::new(ControllerPorts::new()));

        // Create Timers wrapped in Rc<RefCell> for shared access
        let timers = Rc::new(RefCell::new(Timers::new()));

        // Create Interrupt Controller wrapped in Rc<RefCell> for shared access
        let interrupt_controller = Rc::new(RefCell::new(InterruptController::new()));

        // Create SPU wrapped in Rc<RefCell> for shared access
        let spu = Rc::new(RefCell::new(SPU::new()));

        // Create bus and connect all peripherals for memory-mapped I/O
        let mut bus = Bus::new();
        bus.set_gpu(gpu.clone());
        bus.set_dma(dma.clone());
        bus.set_cdrom(cdrom.clone());
        bus.set_controller_ports(controller_ports.clone());
        bus.set_timers(timers.clone());
        bus.set_interrupt_controller(interrupt_controller.clone());
        bus.set_spu(spu.clone());

        // Create timing manager
        let mut timing = TimingEventManager::new();

        // Register timing events for CD-ROM
        cdrom.borrow_mut().register_events(&mut timing);

        // Register timing events for Timers (channel overflow scheduling;
        // VBlank/HBlank timing is driven directly by GPU::tick, not events)
        timers.borrow_mut().register_events(&mut timing);

        log::info!("Core: All components initialized and timing events registered");

        Self {
            cpu: CPU::new(),
            bus,
            timing,
            gpu,
            spu,
            dma,
            cdrom,
            controller_ports,
            timers,
            interrupt_controller,
            cycles: 0,
            running: false,
            tracer: None,
            trace_limit: 0,
            trace_count: 0,
            last_vblank_cycles: 0,
            vblank_count: 0,
            skip_bios_animation: false,
            pending_exe: None,
        }
    }

    /// PC (after masking off the KSEG0/KSEG1 segment bits) at which the
    /// BIOS shell is ready to hand control to a sideloaded executable, per
    /// the named entry point in the core driver contract.
    const SIDELOAD_HOOK_PC: u32 = 0x0003_0000;

    /// Load BIOS from file
    ///
    /// Loads a BIOS ROM file into the system. The BIOS must be 512KB in size.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the BIOS file
    ///
    /// # Returns
    ///
    /// - `Ok(())` if BIOS was loaded successfully
    /// - `Err(EmulatorError)` if loading fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.load_bios("SCPH1001.BIN").unwrap();
    /// ```
    pub fn load_bios(&mut self, path: &str) -> Result<()> {
        self.bus.load_bios(path)
    }

    /// Reset the system to initial state
    ///
    /// Resets all components as if the console was power-cycled.
    /// This clears RAM/scratchpad but preserves loaded BIOS.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.bus.reset();
        self.gpu.borrow_mut().reset();
        // Reset SPU by creating a new instance and updating bus connection
        self.spu = Rc::new(RefCell::new(SPU::new()));
        self.bus.set_spu(self.spu.clone());
        self.cycles = 0;
        self.running = true;
        self.trace_count = 0;
        self.last_vblank_cycles = 0;
        self.vblank_count = 0;
    }

    /// Suppress (or re-enable) the per-VBlank progress log line.
    ///
    /// Intended to be driven by [`Config::skip_bios_animation`](super::config::Config),
    /// for runs where the BIOS splash/shell animation's frame-by-frame
    /// logging is noise rather than signal.
    pub fn set_skip_bios_animation(&mut self, skip: bool) {
        self.skip_bios_animation = skip;
    }

    /// Execute one CPU instruction
    ///
    /// Executes a single CPU instruction and ticks the GPU accordingly.
    /// The GPU is synchronized with CPU cycles for accurate emulation.
    ///
    /// # Returns
    /// Number of cycles consumed
    ///
    /// # Errors
    /// Returns error if instruction execution fails
    pub fn step(&mut self) -> Result<u32> {
        if (self.cpu.pc() & 0x1FFF_FFFF) == Self::SIDELOAD_HOOK_PC {
            if let Some(exe) = self.pending_exe.take() {
                self.inject_executable(&exe)?;
            }
        }

        // Trace instruction if tracer is enabled
        if let Some(ref mut tracer) = self.tracer {
            // Check if we should still trace
            if self.trace_limit == 0 || self.trace_count < self.trace_limit {
                if let Err(e) = tracer.trace(&self.cpu, &self.bus) {
                    log::warn!("Failed to write trace: {}", e);
                }
                self.trace_count += 1;

                // Flush every 100 instructions to ensure data is written
                if self.trace_count.is_multiple_of(100) {
                    log::debug!("Flushed trace at {} instructions", self.trace_count);
                    let _ = tracer.flush();
                }
            } else if self.trace_count == self.trace_limit {
                log::info!(
                    "Trace limit reached ({} instructions), disabling tracer",
                    self.trace_limit
                );
                // Flush and disable tracer
                let _ = tracer.flush();
                self.trace_count += 1; // Increment to prevent repeated logging
            }
        } else if self.trace_count == 0 {
            // Log once if tracer is not enabled
            static LOGGED: std::sync::atomic::AtomicBool =
                std::sync::atomic::AtomicBool::new(false);
            if !LOGGED.swap(true, std::sync::atomic::Ordering::Relaxed) {
                log::warn!("Tracer is None in step() - tracing not active");
            }
        }

        let cpu_cycles = self.cpu.step(&mut self.bus)?;

        // Tick the DMA register shell (no transfer engine; see core::dma docs)
        let dma_irq = {
            let ram = self.bus.ram_mut();
            self.dma.borrow_mut().tick(ram)
        };

        // Request DMA interrupt if any transfer completed
        if dma_irq {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::DMA);
        }

        // Apply icache invalidation from memory writes (must come before prefill)
        // This maintains cache coherency when memory is modified
        for addr in self.bus.drain_icache_invalidate_queue() {
            self.cpu.invalidate_icache(addr);
        }

        // Apply icache range invalidation from bulk memory writes (e.g., executable loading)
        // This efficiently invalidates large ranges without queueing individual addresses
        for (start, end) in self.bus.drain_icache_invalidate_range_queue() {
            self.cpu.invalidate_icache_range(start, end);
        }

        // Apply icache prefill from memory writes
        // This ensures instructions are cached before execution
        for (addr, instruction) in self.bus.drain_icache_prefill_queue() {
            self.cpu.prefill_icache(addr, instruction);
        }

        // Tick the GPU's scanline/dotclock model. This is the sole source of
        // VBlank/HBlank edges and GPU dotclock pulses; it also presents the
        // frame (Renderer::swap_buffers) exactly once per field.
        let (vblank_irq, hblank_irq, dot_pulses) = self.gpu.borrow_mut().tick(cpu_cycles);

        // Request VBlank interrupt
        if vblank_irq {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::VBLANK);
            self.vblank_count += 1;
            if !self.skip_bios_animation {
                log::debug!("VBlank #{}", self.vblank_count);
            }
        }

        let in_vblank = self.gpu.borrow().is_in_vblank();
        let timer_irqs = self
            .timers
            .borrow_mut()
            .tick(cpu_cycles, dot_pulses, hblank_irq, in_vblank);

        // Run pending timing events to get list of triggered events
        // Note: CPU::execute() also calls this, but we may need to run it here
        // for events triggered during this step
        let triggered_events = if self.timing.pending_ticks > 0 {
            self.timing.run_events()
        } else {
            Vec::new()
        };

        // Process CD-ROM timing events
        // This handles both command scheduling and event callbacks
        self.cdrom
            .borrow_mut()
            .process_events(&mut self.timing, &triggered_events);

        // Process Timer timing events (overflow detection)
        self.timers
            .borrow_mut()
            .process_events(&mut self.timing, &triggered_events);

        // Poll timer interrupts from event-driven timing (channel overflow
        // events scheduled ahead of time; independent of the GPU-driven tick above)
        let timer_irqs_event = self.timers.borrow_mut().poll_interrupts();

        // Merge timer interrupts from both the per-cycle tick above and the
        // event-driven overflow scheduler
        let timer_irqs = [
            timer_irqs[0] || timer_irqs_event[0],
            timer_irqs[1] || timer_irqs_event[1],
            timer_irqs[2] || timer_irqs_event[2],
        ];

        // Request timer interrupts (merged from both timing methods)
        if timer_irqs[0] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER0);
        }
        if timer_irqs[1] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER1);
        }
        if timer_irqs[2] {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::TIMER2);
        }

        // Tick CD-ROM drive (synchronized with CPU cycles) - for legacy timing
        // TODO: Remove this once all CD-ROM timing is event-driven
        self.cdrom.borrow_mut().tick(cpu_cycles);

        // Request CD-ROM interrupt if flag is set
        let cdrom_irq_flag = self.cdrom.borrow().interrupt_flag();
        if cdrom_irq_flag != 0 {
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::CDROM);
        }

        // Tick SPU (with CD-DA mixed in) for envelope/ADSR progression. Sample
        // output itself has no consumer in this core; audio playback is a host
        // concern (see core::renderer for the analogous video collaborator).
        {
            let mut cdrom = self.cdrom.borrow_mut();
            let mut spu = self.spu.borrow_mut();
            let _audio_samples = spu.tick_with_cd(cpu_cycles, &mut cdrom.cd_audio);
        }

        self.cycles += cpu_cycles as u64;

        Ok(cpu_cycles)
    }

    /// Execute multiple instructions
    ///
    /// Executes exactly `n` instructions unless an error occurs.
    ///
    /// # Arguments
    ///
    /// * `n` - Number of instructions to execute
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all instructions executed successfully
    /// - `Err(EmulatorError)` if any instruction fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.step_n(100).unwrap(); // Execute 100 instructions
    /// ```
    pub fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    /// CPU cycles per NTSC field: 33,868,800 / 60 ≈ 564,480.
    ///
    /// `emulate_block` uses this as a redundant safety-net VBlank raise
    /// alongside the GPU's own scanline-driven VBlank interrupt, per the
    /// named entry point in the core driver contract.
    pub const CPU_VBLANK_FREQUENCY: u64 = 564_480;

    /// Run one scheduling block: step the CPU a fixed number of instructions,
    /// let every peripheral (GPU, timers, DMA, CD-ROM, SPU) catch up to the
    /// cycles consumed, and raise a safety-net VBlank interrupt if the
    /// accumulated cycle count has crossed a full NTSC field.
    ///
    /// Each `step()` call already ticks the GPU, timers and friends by the
    /// cycles the instruction it just ran consumed, so by the time this
    /// method returns every peripheral has already caught up to the CPU —
    /// there is no separate bulk `catch_up_to_cpu` call to make here.
    ///
    /// # Returns
    ///
    /// `Ok(())` on success, or the first error raised by the CPU.
    pub fn emulate_block(&mut self) -> Result<()> {
        const INSTRUCTIONS_PER_BLOCK: usize = 10;

        for _ in 0..INSTRUCTIONS_PER_BLOCK {
            self.step()?;
        }

        if self.cycles >= Self::CPU_VBLANK_FREQUENCY {
            self.cycles -= Self::CPU_VBLANK_FREQUENCY;
            self.interrupt_controller
                .borrow_mut()
                .request(interrupts::VBLANK);
        }

        Ok(())
    }

    /// Drive the emulator forever, one block at a time.
    ///
    /// Returns only when `emulate_block` raises a fatal error; recoverable
    /// CPU exceptions are handled inside `step` and never surface here.
    pub fn run(&mut self) -> Result<()> {
        self.running = true;
        while self.running {
            self.emulate_block()?;
        }
        Ok(())
    }

    /// Execute one frame worth of instructions
    ///
    /// The PlayStation CPU runs at approximately 33.8688 MHz.
    /// At 60 fps, one frame requires approximately 564,480 cycles.
    ///
    /// This method uses event-driven execution through the timing system.
    /// The CPU executes until the timing system signals the frame is complete.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if frame executed successfully
    /// - `Err(EmulatorError)` if execution fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.reset();
    /// system.run_frame().unwrap(); // Execute one frame
    /// ```
    pub fn run_frame(&mut self) -> Result<()> {
        // PSX CPU runs at ~33.8688 MHz
        // At 60 fps, one frame = 33868800 / 60 ≈ 564,480 cycles
        const CYCLES_PER_FRAME: u64 = 564_480;

        // Set frame target in timing system
        self.timing.set_frame_target(CYCLES_PER_FRAME);

        // Execute CPU until timing system signals frame complete
        self.cpu.execute(&mut self.bus, &mut self.timing)?;

        // Tick SPU for one frame worth of cycles (envelope/ADSR progression).
        {
            let mut cdrom = self.cdrom.borrow_mut();
            let mut spu = self.spu.borrow_mut();
            let _audio_samples = spu.tick_with_cd(CYCLES_PER_FRAME as u32, &mut cdrom.cd_audio);
        }

        // Update total cycles from timing system
        self.cycles = self.timing.global_tick_counter;

        Ok(())
    }

    /// Get current PC value
    ///
    /// # Returns
    /// Current program counter value
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::system::Core;
    ///
    /// let system = Core::new();
    /// assert_eq!(system.pc(), 0xBFC00000);
    /// ```
    pub fn pc(&self) -> u32 {
        self.cpu.pc()
    }

    /// Get total cycles executed
    ///
    /// # Returns
    /// Total number of cycles since reset
    ///
    /// # Example
    ///
    /// ```
    /// use psx_core::core::system::Core;
    ///
    /// let system = Core::new();
    /// assert_eq!(system.cycles(), 0);
    /// ```
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Get reference to CPU
    ///
    /// # Returns
    /// Reference to CPU instance
    pub fn cpu(&self) -> &CPU {
        &self.cpu
    }

    /// Get mutable reference to CPU
    ///
    /// # Returns
    /// Mutable reference to CPU instance
    pub fn cpu_mut(&mut self) -> &mut CPU {
        &mut self.cpu
    }

    /// Get reference to memory bus
    ///
    /// # Returns
    /// Reference to Bus instance
    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Get mutable reference to memory bus
    ///
    /// # Returns
    /// Mutable reference to Bus instance
    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// Get reference to GPU
    ///
    /// # Returns
    /// Reference to GPU instance (wrapped in Rc<RefCell>)
    pub fn gpu(&self) -> Rc<RefCell<GPU>> {
        Rc::clone(&self.gpu)
    }

    /// Get reference to Controller Ports
    ///
    /// # Returns
    /// Reference to ControllerPorts instance (wrapped in Rc<RefCell>)
    pub fn controller_ports(&self) -> Rc<RefCell<ControllerPorts>> {
        Rc::clone(&self.controller_ports)
    }

    /// Get reference to CDROM
    ///
    /// # Returns
    /// Reference to CDROM instance (wrapped in Rc<RefCell>)
    pub fn cdrom(&self) -> Rc<RefCell<CDROM>> {
        Rc::clone(&self.cdrom)
    }

    /// Stage a PSX-EXE file for sideload, bypassing the BIOS shell's disc
    /// boot and CD-ROM entirely.
    ///
    /// Real disc boot (reading SYSTEM.CNF off an ISO9660 filesystem and
    /// locating the boot executable by path) is out of scope for this core
    /// — see `core::cdrom` — so this is the only way a host harness gets a
    /// game running. Parses the `.exe` header up front but does not touch
    /// RAM or CPU registers yet: the BIOS still needs to run its own
    /// hardware init first. The image is injected the moment `step`
    /// observes the CPU at the BIOS shell's sideload hook (PC &
    /// 0x1FFFFFFF == 0x00030000), per spec.md §6.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a PSX-EXE file on disk
    ///
    /// # Returns
    ///
    /// - `Ok(())` once the file is parsed and staged
    /// - `Err(EmulatorError)` if the file cannot be read or fails to parse
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.load_bios("SCPH1001.BIN").unwrap();
    /// system.load_executable("game.exe").unwrap();
    /// ```
    pub fn load_executable(&mut self, path: &str) -> Result<()> {
        use super::loader::PsxExecutable;

        log::info!("Staging PSX-EXE for sideload: {}", path);
        self.pending_exe = Some(PsxExecutable::load(path)?);
        Ok(())
    }

    /// Copy a staged PSX-EXE's program image into RAM and point the CPU at
    /// its entry point, with $gp/$sp/$fp set up per the header.
    fn inject_executable(&mut self, exe: &super::loader::PsxExecutable) -> Result<()> {
        self.bus.write_ram_slice(exe.load_address, &exe.data)?;

        self.cpu.set_pc(exe.pc);
        self.cpu.set_reg(28, exe.gp); // $gp

        let sp = exe.initial_sp();
        self.cpu.set_reg(29, sp); // $sp
        self.cpu.set_reg(30, sp); // $fp

        log::info!("Sideloaded executable, entry point 0x{:08X}", exe.pc);
        log::info!("Global pointer: 0x{:08X}", exe.gp);
        log::info!("Stack pointer: 0x{:08X}", sp);

        Ok(())
    }

    /// Enable CPU execution tracing to a file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the trace file to write
    /// * `limit` - Maximum number of instructions to trace (0 = unlimited)
    ///
    /// # Returns
    ///
    /// - `Ok(())` if tracing was enabled successfully
    /// - `Err(EmulatorError)` if file creation fails
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.enable_tracing("trace.log", 5000).unwrap(); // Trace first 5000 instructions
    /// ```
    pub fn enable_tracing(&mut self, path: &str, limit: usize) -> Result<()> {
        self.tracer = Some(CpuTracer::new(path)?);
        self.trace_limit = limit;
        self.trace_count = 0;
        log::info!(
            "CPU tracing enabled: {} (limit: {})",
            path,
            if limit == 0 {
                "unlimited".to_string()
            } else {
                limit.to_string()
            }
        );
        Ok(())
    }

    /// Disable CPU execution tracing
    ///
    /// Closes the trace file and disables tracing.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use psx_core::core::system::Core;
    ///
    /// let mut system = Core::new();
    /// system.enable_tracing("trace.log", 1000).unwrap();
    /// // ... run emulation ...
    /// system.disable_tracing();
    /// ```
    pub fn disable_tracing(&mut self) {
        if self.tracer.is_some() {
            log::info!(
                "CPU tracing disabled (traced {} instructions)",
                self.trace_count
            );
            self.tracer = None;
            self.trace_limit = 0;
            self.trace_count = 0;
        }
    }

    /// Check if tracing is currently enabled
    ///
    /// # Returns
    /// true if tracing is active
    pub fn is_tracing(&self) -> bool {
        self.tracer.is_some()
    }

    /// Get the number of instructions traced so far
    ///
    /// # Returns
    /// Number of instructions traced
    pub fn trace_count(&self) -> usize {
        self.trace_count
    }
}

impl Default for Core {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_creation() {
        let system = Core::new();

        assert_eq!(system.cycles, 0);
        assert!(!system.running);
        assert_eq!(system.pc(), 0xBFC00000); // BIOS entry point
        assert!(system.tracer.is_none());
        assert_eq!(system.trace_limit, 0);
        assert_eq!(system.trace_count, 0);
    }

    #[test]
    fn test_core_default() {
        let system1 = Core::new();
        let system2 = Core::default();

        assert_eq!(system1.cycles, system2.cycles);
        assert_eq!(system1.running, system2.running);
        assert_eq!(system1.pc(), system2.pc());
    }

    #[test]
    fn test_core_reset() {
        let mut system = Core::new();

        // Execute some instructions
        system.cycles = 1000;
        system.running = true;
        system.trace_count = 50;

        // Reset
        system.reset();

        // Verify reset state
        assert_eq!(system.cycles, 0);
        assert!(system.running); // Reset sets running to true
        assert_eq!(system.pc(), 0xBFC00000);
        assert_eq!(system.trace_count, 0);
    }

    #[test]
    fn test_core_initial_pc() {
        let system = Core::new();
        // After reset, PC should be at BIOS entry point
        assert_eq!(system.pc(), 0xBFC00000);
    }

    #[test]
    fn test_core_initial_cycles() {
        let system = Core::new();
        assert_eq!(system.cycles(), 0);
    }

    #[test]
    fn test_core_cpu_access() {
        let system = Core::new();
        let cpu = system.cpu();

        assert_eq!(cpu.pc(), 0xBFC00000);
    }

    #[test]
    fn test_core_cpu_mut_access() {
        let mut system = Core::new();
        let cpu = system.cpu_mut();

        // Verify mutable access works
        assert_eq!(cpu.pc(), 0xBFC00000);
    }

    #[test]
    fn test_core_bus_access() {
        let system = Core::new();
        let _bus = system.bus();

        // Just verify we can get a reference
    }

    #[test]
    fn test_core_bus_mut_access() {
        let mut system = Core::new();
        let _bus = system.bus_mut();

        // Verify mutable access works
    }

    #[test]
    fn test_core_gpu_access() {
        let system = Core::new();
        let gpu = system.gpu();

        // Verify we get an Rc<RefCell<GPU>>
        assert!(gpu.try_borrow().is_ok());
    }

    #[test]
    fn test_core_controller_ports_access() {
        let system = Core::new();
        let controller_ports = system.controller_ports();

        // Verify we get an Rc<RefCell<ControllerPorts>>
        assert!(controller_ports.try_borrow().is_ok());
    }

    #[test]
    fn test_core_cdrom_access() {
        let system = Core::new();
        let cdrom = system.cdrom();

        // Verify we get an Rc<RefCell<CDROM>>
        assert!(cdrom.try_borrow().is_ok());
    }

    #[test]
    fn test_tracing_disabled_by_default() {
        let system = Core::new();
        assert!(!system.is_tracing());
        assert_eq!(system.trace_count(), 0);
    }

    #[test]
    fn test_disable_tracing_when_not_enabled() {
        let mut system = Core::new();

        // Should not panic when disabling tracing that's not enabled
        system.disable_tracing();

        assert!(!system.is_tracing());
    }

    #[test]
    fn test_core_components_share_connections() {
        let system = Core::new();

        // Get references to shared components
        let gpu1 = system.gpu();
        let gpu2 = system.gpu();

        // Verify they're the same instance
        assert!(Rc::ptr_eq(&gpu1, &gpu2));
    }

    #[test]
    fn test_core_reset_preserves_bios() {
        let mut system = Core::new();

        // Note: We can't easily load a BIOS in tests without a file,
        // but we can verify reset doesn't panic
        system.reset();

        // Verify PC is at BIOS entry point
        assert_eq!(system.pc(), 0xBFC00000);
    }

    #[test]
    fn test_core_step_n_zero() {
        let mut system = Core::new();
        system.reset();

        // Step 0 instructions should succeed
        let result = system.step_n(0);
        assert!(result.is_ok());
    }

    #[test]
    fn test_core_cycles_increment() {
        let mut system = Core::new();
        system.reset();

        let initial_cycles = system.cycles();

        // Execute one instruction (may fail without BIOS, but that's ok for this test)
        let _ = system.step();

        // Cycles should have incremented (or stayed the same if step failed)
        assert!(system.cycles() >= initial_cycles);
    }

    #[test]
    fn test_core_controller_ports_port_1_connected() {
        let system = Core::new();
        let ports = system.controller_ports();
        let mut ports_ref = ports.borrow_mut();

        // Port 1 should have a controller
        assert!(ports_ref.get_controller_mut(0).is_some());
    }

    #[test]
    fn test_core_controller_ports_port_2_disconnected() {
        let system = Core::new();
        let ports = system.controller_ports();
        let mut ports_ref = ports.borrow_mut();

        // Port 2 should not have a controller
        assert!(ports_ref.get_controller_mut(1).is_none());
    }

    #[test]
    fn test_core_multiple_resets() {
        let mut system = Core::new();

        // Reset multiple times
        for _ in 0..5 {
            system.reset();
            assert_eq!(system.pc(), 0xBFC00000);
            assert_eq!(system.cycles(), 0);
        }
    }

    #[test]
    fn test_core_load_executable_missing_file() {
        let mut system = Core::new();

        let result = system.load_executable("nonexistent.exe");
        assert!(result.is_err());
    }

    fn write_psx_exe(pc: u32, gp: u32, load_address: u32, body: &[u8]) -> tempfile::NamedTempFile {
        let mut header = vec![0u8; 0x800];
        header[0..8].copy_from_slice(b"PS-X EXE");
        header[0x10..0x14].copy_from_slice(&pc.to_le_bytes());
        header[0x14..0x18].copy_from_slice(&gp.to_le_bytes());
        header[0x18..0x1C].copy_from_slice(&load_address.to_le_bytes());
        header[0x1C..0x20].copy_from_slice(&(body.len() as u32).to_le_bytes());
        header.extend_from_slice(body);

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), &header).unwrap();
        file
    }

    #[test]
    fn test_core_load_executable_stages_without_touching_cpu() {
        let mut system = Core::new();
        system.reset();
        let entry_pc = system.pc();

        let file = write_psx_exe(0x8001_0000, 0, 0x8001_0000, &[0xAA; 16]);
        system.load_executable(file.path().to_str().unwrap()).unwrap();

        // Staged, not yet injected: CPU still sits at the BIOS reset vector.
        assert_eq!(system.pc(), entry_pc);
    }

    #[test]
    fn test_core_sideload_injects_at_shell_hook() {
        let mut system = Core::new();
        system.reset();

        let file = write_psx_exe(0x8001_0000, 0x1234, 0x8001_0000, &[0xAA; 16]);
        system.load_executable(file.path().to_str().unwrap()).unwrap();

        // Jam the CPU at the sideload hook PC so the next step injects.
        system.cpu.set_pc(Core::SIDELOAD_HOOK_PC);
        system.step().unwrap();

        // The EXE's program image is now resident in RAM and $gp was set
        // from the header; PC has already moved past the entry instruction
        // by the time step() returns.
        assert_eq!(system.bus_mut().read32(0x8001_0000).unwrap(), 0xAAAAAAAA);
        assert_eq!(system.cpu.reg(28), 0x1234);
        assert_ne!(system.pc() & 0x1FFF_FFFF, Core::SIDELOAD_HOOK_PC);
    }

    #[test]
    fn test_core_components_independent_borrowing() {
        let system = Core::new();

        // Borrow multiple components simultaneously (immutable)
        let gpu_rc = system.gpu();
        let cdrom_rc = system.cdrom();
        let ports_rc = system.controller_ports();

        let _gpu = gpu_rc.borrow();
        let _cdrom = cdrom_rc.borrow();
        let _ports = ports_rc.borrow();

        // Should not panic - all are independent Rc<RefCell<>>
    }

    #[test]
    fn test_core_cycles_per_frame_constant() {
        // Verify the constant matches expected value
        // PSX CPU: ~33.8688 MHz / 60 fps ≈ 564,480 cycles
        const EXPECTED_CYCLES_PER_FRAME: u64 = 564_480;

        // This is a compile-time constant check
        assert_eq!(EXPECTED_CYCLES_PER_FRAME, 564_480);
    }

    #[test]
    fn test_core_timing_manager_initialized() {
        let system = Core::new();

        // Timing manager should be initialized (we can't easily test its internals,
        // but we can verify the system doesn't panic on creation)
        assert_eq!(system.cycles, 0);
    }

    #[test]
    fn test_core_interrupt_controller_accessible() {
        let system = Core::new();

        // Verify interrupt controller is accessible through bus
        // (indirect test since it's not directly exposed)
        let _bus = system.bus();
    }

    #[test]
    fn test_core_dma_controller_initialized() {
        let system = Core::new();

        // DMA controller should be initialized
        // (indirect test since it's not directly exposed)
        assert_eq!(system.cycles, 0);
    }

    #[test]
    fn test_core_spu_initialized() {
        let system = Core::new();

        // SPU should be initialized
        // (indirect test since it's not directly exposed)
        assert_eq!(system.cycles, 0);
    }

    #[test]
    fn test_core_timers_initialized() {
        let system = Core::new();

        // Timers should be initialized
        // (indirect test since it's not directly exposed)
        assert_eq!(system.cycles, 0);
    }

    #[test]
    fn test_core_reset_clears_cycles() {
        let mut system = Core::new();

        system.cycles = 1000000;
        system.reset();

        assert_eq!(system.cycles, 0);
    }

    #[test]
    fn test_core_reset_sets_running_flag() {
        let mut system = Core::new();

        system.running = false;
        system.reset();

        assert!(system.running);
    }
}
