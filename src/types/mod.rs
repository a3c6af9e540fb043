//! Type definitions for the pinner
//!
//! This module contains the session inputs, stored responses and the shapes
//! returned to callers.

pub mod loose;
pub mod request;
pub mod response;

pub use loose::{is_truthy, loose_eq, scalar_to_string};
pub use request::{Credentials, PinDraft};
pub use response::{Boards, LastResponse, PinCreated, ResponseBody, UserData};
