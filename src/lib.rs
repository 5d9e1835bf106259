// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! LINE bot that answers messages with Vertex AI Search summaries.

pub mod app;
pub mod models;
pub mod services;
