// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Contract invocation through the Stellar CLI.

pub mod command;
pub mod runner;

pub use command::{
    escape_value, sanitize_arg_name, CliInvocation, InvocationRequest, InvokeArg, InvokeDefaults,
    InvokeRequest,
};
pub use runner::{CommandOutput, CommandRunner, ProcessRunner};

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("failed to start {0}")]
    Spawn(String),

    #[error("command output exceeded {0} bytes")]
    OutputLimit(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
