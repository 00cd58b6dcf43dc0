//! Typed operations against the account API.
//!
//! # Overview
//!
//! - [`auth`]: login, registration, token refresh and password reset, plus
//!   the sign-in and sign-out workflows
//! - [`profile`]: profile read and update, avatar upload
//! - [`types`]: payloads shared by both
//!
//! Every operation goes through an [`HttpClient`](crate::HttpClient), so
//! the bearer token and one-shot refresh apply throughout.
//!
//! # Example
//!
//! ```rust,ignore
//! use account_api::api::{sign_in, get_profile, LoginCredentials};
//!
//! let credential = sign_in(&client, &LoginCredentials::new("a@b.com", "secret1")).await?;
//! let user = get_profile(&client).await?;
//! ```

pub mod auth;
pub mod profile;
pub mod types;

pub use auth::{
    authorize, login, refresh, register, register_and_sign_in, request_password_reset,
    reset_password, sign_in, sign_out, Registration,
};
pub use profile::{get_profile, update_avatar, update_profile, AvatarFile, MAX_AVATAR_BYTES};
pub use types::{
    Address, LoginCredentials, LoginResponse, MessageResponse, ProfileResponse, RegisterResponse,
    UpdateProfileResponse, User,
};
