//! Core library for qbank
//!
//! This crate implements the **Functional Core** of the qbank application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The qbank project splits its work across three crates:
//!
//! - **`qbank_core`** (this crate): Pure transformation functions with no network I/O
//! - **`pdf`**: Flattening PDF documents into page-ordered text
//! - **`qbank`**: HTTP fetching, file writes, and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! - **Pure functions**: The same text always yields the same question bank
//! - **No side effects**: Parsing and whitelisting never touch the network or the output files
//! - **Testable**: Every stage can be driven from fixture strings, no mocking required
//!
//! # Module Organization
//!
//! - [`bank`]: Question records and the persisted bank document
//! - [`config`]: Bank variant configuration (built-in list or TOML file)
//! - [`links`]: Picking the download link of each variant from the source page
//! - [`cache`]: Deciding whether a cached PDF is still current
//! - [`parse`]: Section split, chapter segmentation, question extraction, answer reconciliation
//! - [`whitelist`]: The "always correct" option texts and per-question tagging
//! - [`summary`]: Counts reported after a bank has been built
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use qbank_core::{parse::parse_bank_text, whitelist::build_bank_output};
//!
//! let text = "1. 題目 (A)甲 (B)乙 (C)丙 (D)丁\n答案\n1. A";
//! let parsed = parse_bank_text(text);
//! let bank = build_bank_output(parsed.questions);
//!
//! assert_eq!(bank.questions.len(), 1);
//! assert!(bank.questions[0].can_memorize_directly);
//! ```

pub mod bank;
pub mod cache;
pub mod config;
pub mod links;
pub mod parse;
pub mod summary;
pub mod whitelist;
