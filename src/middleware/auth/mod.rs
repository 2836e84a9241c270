pub mod access;
pub mod action;
