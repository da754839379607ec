// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod categories;
pub mod items;
pub mod transactions;
pub mod pay;
pub mod envelopes;
pub mod plan;
pub mod settings;
pub mod exporter;
pub mod doctor;
