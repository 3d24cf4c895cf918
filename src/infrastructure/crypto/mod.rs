//! Credential handling: bcrypt PIN hashes and JWT operator tokens

pub mod jwt;
pub mod password;
