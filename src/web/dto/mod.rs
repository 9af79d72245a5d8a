//! Request and response DTOs for the Web API.

mod request;
mod response;

pub use request::{LoginRequest, SignupRequest};
pub use response::{
    ApiResponse, FileMetadataResponse, FileResponse, MessageResponse, UserResponse,
};
