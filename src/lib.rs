//! Stepsmith core library.
//!
//! This library turns Gherkin feature files into Java Cucumber
//! step-definition skeletons. Steps are extracted from a feature tree,
//! deduplicated across files, classified into API, MOBILE, WEB, and COMMON
//! classes, and rendered as one Java source file per class.

pub mod classify;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod extract;
pub mod hasher;
pub mod model;
pub mod normalize;
pub mod organize;
pub mod render;
pub mod report;
pub mod runner;
pub mod synth;
pub mod tokens;
