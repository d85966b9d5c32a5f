// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams towards external collaborators.

pub mod platform;

pub use platform::PlatformClient;
