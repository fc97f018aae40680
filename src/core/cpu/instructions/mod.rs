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

//! Instruction handlers, grouped by family. Each file adds methods to
//! [`super::CPU`] via its own `impl CPU` block; nothing here is dispatched
//! except through `super::dispatch::execute_instruction`.

mod arithmetic;
mod branch;
mod cop0;
mod exception;
mod gte;
mod jump;
mod loadstore;
mod logical;
mod multiply;
mod shift;
