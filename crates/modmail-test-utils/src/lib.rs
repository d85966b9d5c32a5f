// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Modmail integration tests.
//!
//! Provides a scripted platform and interaction builders for fast,
//! deterministic tests without a Discord connection.
//!
//! # Components
//!
//! - [`MockPlatform`] - In-memory platform with failure injection and call capture
//! - [`events`] - Builders for command, component and modal interactions

pub mod events;
pub mod mock_platform;

pub use mock_platform::{MockPlatform, PlatformCall, PlatformOp};
