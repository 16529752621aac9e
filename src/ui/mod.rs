//! UI module - contains reusable UI components

pub mod components;
