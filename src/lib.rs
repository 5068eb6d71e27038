//! Simulation of Capitaly, a board game in which players circle a track of
//! tiles, buy and develop real estate, and go bankrupt when they cannot pay.

pub mod config;
pub mod console;
pub mod game;
pub mod input;
