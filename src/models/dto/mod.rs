pub mod deserializers;
pub mod request;
pub mod response;
