//! Huzzlingo - conversation-practice game core
//!
//! Quiz lessons with XP and levels, a daily streak, time tracking, and a
//! scored ten-message chat challenge. Everything is driven through
//! [`game::Game`], which owns the state and persists it to a [`storage::Store`].

pub mod catalog;
pub mod chat;
pub mod core;
pub mod game;
pub mod llm;
pub mod progress;
pub mod quiz;
pub mod storage;
