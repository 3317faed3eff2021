pub mod links;
pub mod notice;
pub mod preview;
pub mod resolve;
pub mod run;
pub mod watch;
