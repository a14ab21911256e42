pub mod config;
pub mod run;
pub mod simulate;
pub mod status;
pub mod variant;
