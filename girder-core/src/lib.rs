// Core library exports for the Girder web framework

pub mod application;
pub mod container;
pub mod content;
pub mod decorator;
pub mod encoder;
pub mod error;
pub mod negotiation;
pub mod request;
pub mod response;
pub mod status;
pub mod traits;
pub mod value;

pub use application::Application;
pub use container::Container;
pub use content::{Content, RenderHtml};
pub use decorator::{
    FilterSensitiveError, Handler, HttpStatusDecorator, ResponseDecorator,
    SENSITIVE_ERROR_MESSAGE,
};
pub use encoder::{
    DataToJson, Encoder, ErrorToHtml, ErrorToJson, JsonApiDocument, JsonApiError, JsonToJson,
    RenderToHtml, TextToHtml, ValueThrough, encode_through, html_encoders, json_encoders,
};
pub use error::{AppError, Error};
pub use negotiation::{Accept, MediaType, encoders_for};
pub use request::{BODY_DECODER, BodyDecoder, Method, Request};
pub use response::Response;
pub use status::{DEFAULT_STATUS, HttpStatus, is_client_error, is_server_error};
pub use traits::Provider;
pub use value::{Map, Value};
