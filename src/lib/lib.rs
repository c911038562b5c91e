#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod controller;
pub mod drivers;
pub mod error;
pub mod filtering;
pub mod robot;
pub mod sensors;
