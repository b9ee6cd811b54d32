#![no_std]

pub mod gateway;
pub mod text;
pub mod ttl;

pub use gateway::{ChargeGateway, ChargeGatewayClient, ChargeIntent, GatewayError};
