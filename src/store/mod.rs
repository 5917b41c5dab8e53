// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for flow documents on disk.
//!
//! A document is stored as one pretty-printed JSON file; loading re-checks
//! the structural invariants before handing the document out.

pub mod bot_file;

pub use bot_file::{load_bot, save_bot, StoreError, WriteDurability};
