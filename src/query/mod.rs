// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Triton-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Triton and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a flow document.

pub mod flow;

pub use flow::{
    block_degrees, dangling_edges, empty_blocks, orphan_steps, reachable_block_ids, BlockDegree,
};
