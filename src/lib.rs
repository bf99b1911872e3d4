//! Client console for a remote inference API: sentiment analysis, text
//! generation and summarization, plus status and model information.
//!
//! The same page state drives two front ends: the `inferencia` CLI and an
//! embedded web page served by `inferencia web`.

pub mod activity;
pub mod api;
pub mod cli;
pub mod config;
pub mod console;
pub mod handlers;
pub mod view;
pub mod web;
