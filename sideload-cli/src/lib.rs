//! Sideload CLI - Command-line interface for sideload.
//!
//! This crate provides the `sideload` tool for validating descriptor
//! configuration and rendering serialized objects as compound documents.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
