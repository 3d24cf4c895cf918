//! Outer interfaces of the kiosk service

pub mod http;
