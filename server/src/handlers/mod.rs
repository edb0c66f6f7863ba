// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Request handlers, one module per route group.
//!
//! Each handler validates required fields first (a validation failure
//! never reaches the store), makes exactly one database call, and shapes
//! the result into the `{ success, ... }` JSON envelope.

pub mod auth;
pub mod donations;
pub mod gratitude;
pub mod orders;
pub mod pomodoro;
pub mod tasks;
