pub mod abi;
pub mod deployment;
pub mod domain;
pub mod error;
pub mod protocol;
