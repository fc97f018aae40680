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

//! Minimal headless host harness for psx-core.
//!
//! Loads a BIOS image (and optionally sideloads a PSX-EXE), then drives the
//! core with a [`NullRenderer`]. There is no windowing, no audio, and no
//! input here — this binary exists to exercise the core end to end, not to
//! be a playable frontend.

use clap::Parser;
use psx_core::core::config::Config;
use psx_core::core::renderer::NullRenderer;
use psx_core::core::system::Core;

#[derive(Debug, Parser)]
#[command(name = "psx-core", about = "Headless psx-core host harness")]
struct Args {
    /// Path to the 512 KiB BIOS image.
    #[arg(short, long)]
    bios: Option<String>,

    /// Optional PSX-EXE to sideload once the BIOS shell is reached.
    #[arg(short, long)]
    exe: Option<String>,

    /// Optional psx-core.toml config file; CLI flags override its values.
    #[arg(short, long, default_value = "psx-core.toml")]
    config: String,
}

fn main() {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let mut config = Config::load(&args.config);
    if args.bios.is_some() {
        config.bios_path = args.bios;
    }
    if args.exe.is_some() {
        config.exe_path = args.exe;
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let Some(bios_path) = config.bios_path.clone() else {
        eprintln!("no BIOS path given (pass --bios or set bios_path in psx-core.toml)");
        std::process::exit(1);
    };

    let mut core = Core::with_renderer(NullRenderer::default());
    core.set_skip_bios_animation(config.skip_bios_animation);

    if let Err(err) = core.load_bios(&bios_path) {
        log::error!("failed to load BIOS from '{bios_path}': {err}");
        std::process::exit(1);
    }
    core.reset();

    if let Some(exe_path) = &config.exe_path {
        if let Err(err) = core.load_executable(exe_path) {
            log::error!("failed to load EXE from '{exe_path}': {err}");
            std::process::exit(1);
        }
        log::info!("staged '{exe_path}' for sideload");
    }

    log::info!("booting BIOS from '{bios_path}'");

    if let Err(err) = core.run() {
        log::error!("emulator halted: {err}");
        std::process::exit(1);
    }
}
