// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Shared data models for the lifestyle-assistant backend.
//!
//! Each entity lives in its own module with two kinds of types:
//! the database model (`sqlx::FromRow`, serialized back to the client)
//! and the API payloads used to create or update records. Keeping them
//! separate lets the API evolve without touching the table shape.

pub mod donations;
pub mod gratitude;
pub mod orders;
pub mod pomodoro;
pub mod tasks;

pub use donations::{CreateDonationPayload, Donation, UpdateDonationPayload};
pub use gratitude::{CreateNotePayload, GratitudeNote, UpdateNotePayload};
pub use orders::{CreateOrderPayload, Order, OrderItem, UpdateOrderStatusPayload};
pub use pomodoro::{CreateSessionPayload, PomodoroSession};
pub use tasks::{CreateTaskPayload, Task, UpdateTaskPayload};
