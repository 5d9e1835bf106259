// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod credentials;
pub mod error;
pub mod ingress;
pub mod line;
pub mod logging;
pub mod pipeline;
pub mod search;
pub mod signature;
