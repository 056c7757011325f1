//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id)
//! - Bearer tokens (JWT, HS256)
//! - Cryptographic utilities (HMAC-signed values, SHA-512 digests, Base64)
//! - Cookie management
//! - Local upload storage

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
pub mod upload;
