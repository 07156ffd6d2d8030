pub mod config;
pub mod generate;
pub mod merchant;
pub mod serve;
pub mod verify;
