//! # ib-admin
//!
//! Command-line front end for the inline block usage report.
//!
//! ```text
//! ib-admin [--db-path DIR | --demo] [--config FILE] <command>
//!
//!   list-block <blockType>   pages embedding blocks of one bundle
//!                            (aliases: inline-block:list, inline-block-list)
//!   serve                    HTTP usage table
//!   seed-demo                write the demo dataset
//! ```

pub mod cli;
pub mod commands;
pub mod output;
pub mod store;

pub use cli::{Args, Command};
